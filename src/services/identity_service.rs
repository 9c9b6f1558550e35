// src/services/identity_service.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    db::ProfileRepository,
    models::profile::{Claims, Profile},
};

/// Valida os tokens do provedor de identidade externo e mantém o espelho
/// local de perfis em dia. O provedor em si fica fora do sistema: daqui só
/// saem leituras das claims, nunca decisões de autorização.
#[derive(Clone)]
pub struct IdentityService {
    profile_repo: ProfileRepository,
    jwt_secret: String,
}

impl IdentityService {
    pub fn new(profile_repo: ProfileRepository, jwt_secret: String) -> Self {
        Self {
            profile_repo,
            jwt_secret,
        }
    }

    pub async fn authenticate(&self, token: &str) -> Result<Profile, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let claims = token_data.claims;

        // Caminho rápido: perfil já sincronizado
        if let Some(profile) = self.profile_repo.find_by_id(&claims.sub).await? {
            return Ok(profile);
        }

        // Primeira visita deste usuário: cria o perfil a partir das claims
        let profile = self
            .profile_repo
            .upsert(&claims.sub, claims.email.as_deref(), claims.name.as_deref())
            .await?;

        tracing::info!("👤 Perfil criado para o usuário {}", profile.id);

        Ok(profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.list().await
    }
}
