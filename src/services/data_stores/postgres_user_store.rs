use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    CalendarDate, Email, Password, PersonName, PhoneNumber, User, UserId,
    UserPasswordHash, UserProfile, UserStore, UserStoreError, ValidationError,
};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    address: Option<String>,
    phone_number: Option<String>,
    travel_interests: Option<String>,
    dob: Option<NaiveDate>,
}

impl TryFrom<CustomerRow> for User {
    type Error = UserStoreError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let invalid = |e: ValidationError| UserStoreError::UnexpectedError(eyre!(e));
        Ok(User {
            id: UserId::new(row.customer_id),
            email: Email::parse(Secret::new(row.email)).map_err(invalid)?,
            hash: UserPasswordHash::parse(Secret::new(row.password_hash))
                .map_err(UserStoreError::UnexpectedError)?,
            profile: UserProfile {
                first_name: PersonName::parse(&row.first_name).map_err(invalid)?,
                last_name: PersonName::parse(&row.last_name).map_err(invalid)?,
                address: row.address,
                phone_number: row
                    .phone_number
                    .as_deref()
                    .map(PhoneNumber::parse)
                    .transpose()
                    .map_err(invalid)?,
                travel_interests: row.travel_interests,
                dob: row.dob.map(CalendarDate::new),
            },
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding customer to PostgreSQL", skip_all)]
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                customer_id, first_name, last_name, email, password_hash,
                address, phone_number, travel_interests, dob
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_ref())
        .bind(user.profile.first_name.as_ref())
        .bind(user.profile.last_name.as_ref())
        .bind(user.email.as_ref().expose_secret())
        .bind(user.hash.as_ref().expose_secret())
        .bind(user.profile.address.as_deref())
        .bind(user.profile.phone_number.as_ref().map(|p| p.as_ref().as_str()))
        .bind(user.profile.travel_interests.as_deref())
        .bind(user.profile.dob.map(|d| d.value_of()))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserStoreError::UserAlreadyExists
            }
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving customer from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, first_name, last_name, email, password_hash,
                   address, phone_number, travel_interests, dob
            FROM customers
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => UserStoreError::UserNotFound,
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?
        .try_into()
    }

    #[tracing::instrument(
        name = "Validating customer credentials in PostgreSQL",
        skip_all
    )]
    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let user = self.get_user(email).await?;
        user.hash
            .verify(password)
            .await
            .map_err(|_| UserStoreError::InvalidCredentials)
    }
}
