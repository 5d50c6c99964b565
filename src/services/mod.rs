pub mod data_stores;
pub mod invitations;
pub mod postmark_email_client;
