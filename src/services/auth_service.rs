use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;

use crate::config::get_config;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<User> {
        let username_taken: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE username = $1"#)
                .bind(&payload.username)
                .fetch_one(&self.pool)
                .await?;
        if username_taken > 0 {
            return Err(Error::BadRequest("Username is already taken".to_string()));
        }

        let email_taken: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE email = $1"#)
                .bind(&payload.email)
                .fetch_one(&self.pool)
                .await?;
        if email_taken > 0 {
            return Err(Error::BadRequest("Email is already in use".to_string()));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, is_teacher)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<(User, String)> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(&payload.username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid username or password".to_string()))?;

        let ok = verify_password(&payload.password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        let config = get_config();
        let expires_at = Utc::now() + Duration::hours(config.token_ttl_hours);
        let claims = Claims {
            sub: user.id.to_string(),
            exp: expires_at.timestamp() as usize,
            role: Some("teacher".to_string()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
    }
}
