// src/db/profile_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::profile::Profile};

// O repositório de perfis, espelho local dos usuários do provedor de identidade
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    // Sincroniza o perfil a partir das claims do token; dados já conhecidos
    // não são apagados por claims ausentes
    pub async fn upsert(
        &self,
        id: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, full_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, profiles.email),
                full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    // Para os seletores de atribuição (técnico responsável, membros de equipe)
    pub async fn list(&self) -> Result<Vec<Profile>, AppError> {
        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles ORDER BY full_name NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }
}
