use askama::Template;
use color_eyre::eyre::{Context, Result};
use reqwest::Url;
use secrecy::ExposeSecret;
use tokio::task::JoinHandle;

use crate::{
    app_state::EmailClientType,
    domain::{Member, TripName},
};

/// Builds `{base}/register?name=..&email=..`, the link that pre-fills the
/// registration form for an invited member.
pub fn invite_link(base_url: &str, member: &Member) -> Result<Url> {
    let register = format!("{}/register", base_url.trim_end_matches('/'));
    Url::parse_with_params(
        &register,
        &[
            ("name", member.name.as_ref().as_str()),
            ("email", member.email.as_ref().expose_secret().as_str()),
        ],
    )
    .wrap_err("failed to build invitation link")
}

#[derive(Template)]
#[template(path = "invitation.html")]
struct InvitationHtml<'a> {
    name: &'a str,
    trip_name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "invitation.txt")]
struct InvitationText<'a> {
    name: &'a str,
    trip_name: &'a str,
    link: &'a str,
}

/// The rendered HTML and plain-text parts of one invitation. Names are
/// escaped in the HTML part.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationContent {
    pub html: String,
    pub text: String,
}

pub fn invitation_content(
    base_url: &str,
    trip_name: &TripName,
    member: &Member,
) -> Result<InvitationContent> {
    let link = invite_link(base_url, member)?;
    let (name, trip_name, link) =
        (member.name.as_ref().as_str(), trip_name.as_ref().as_str(), link.as_str());

    let html = InvitationHtml { name, trip_name, link }
        .render()
        .wrap_err("failed to render invitation HTML")?;
    let text = InvitationText { name, trip_name, link }
        .render()
        .wrap_err("failed to render invitation text")?;

    Ok(InvitationContent { html, text })
}

/// Sends one invitation per member, each on its own task.
///
/// Delivery is best effort. A failed send is logged and never reported back
/// to the caller, so the returned handles only need awaiting in tests.
#[tracing::instrument(name = "Sending trip invitations", skip_all)]
pub fn send_invitations(
    email_client: EmailClientType,
    base_url: &str,
    trip_name: &TripName,
    members: &[Member],
) -> Vec<JoinHandle<()>> {
    let subject = format!("You're invited to {}", trip_name.as_ref());

    members
        .iter()
        .filter_map(|member| match invitation_content(base_url, trip_name, member) {
            Ok(content) => Some((member, content)),
            Err(e) => {
                tracing::warn!(error = ?e, member_id = %member.member_id, "skipping invitation");
                None
            }
        })
        .map(|(member, content)| {
            let email_client = email_client.clone();
            let recipient = member.email.clone();
            let member_id = member.member_id;
            let subject = subject.clone();

            tokio::spawn(async move {
                if let Err(e) = email_client
                    .send_email(&recipient, &subject, &content.html, &content.text)
                    .await
                {
                    tracing::warn!(error = ?e, %member_id, "invitation email failed");
                }
            })
        })
        .collect()
}
