// src/services/access.rs

use crate::{
    common::error::AppError,
    db::RoleRepository,
    models::access::{legacy_role_for_email, Permission, Role},
    models::auth::User,
};

// Résolution du rôle et contrôles de capacité. La table user_roles
// est la source primaire ; la correspondance e-mail n'est qu'un
// reliquat de migration, consulté seulement en l'absence de ligne.
#[derive(Clone)]
pub struct AccessService {
    role_repo: RoleRepository,
}

impl AccessService {
    pub fn new(role_repo: RoleRepository) -> Self {
        Self { role_repo }
    }

    // Contrat : "pas de rôle résolu" (pas de ligne, erreur de lecture)
    // vaut AUCUNE permission — jamais un accès par défaut.
    pub async fn resolve_role(&self, user: &User) -> Option<Role> {
        match self.role_repo.find_role_for_user(user.id).await {
            Ok(Some(role)) => Some(role),
            Ok(None) => {
                let legacy = legacy_role_for_email(&user.email);
                if legacy.is_some() {
                    tracing::warn!(
                        email = %user.email,
                        "Rôle résolu via l'ancien schéma e-mail ; migrer ce compte vers user_roles"
                    );
                }
                legacy
            }
            Err(e) => {
                tracing::warn!("Échec de lecture du rôle, accès refusé par défaut : {}", e);
                None
            }
        }
    }

    // Résout le rôle et exige la permission donnée. 403 sinon.
    pub async fn require(&self, user: &User, permission: Permission) -> Result<Role, AppError> {
        let role = self
            .resolve_role(user)
            .await
            .ok_or(AppError::AccessDenied(permission.slug()))?;

        if !role.has_permission(permission) {
            return Err(AppError::AccessDenied(permission.slug()));
        }

        Ok(role)
    }

    pub async fn assign_role(&self, user_id: uuid::Uuid, role: Role) -> Result<(), AppError> {
        self.role_repo.assign_role(user_id, role).await
    }

    // Porte d'entrée de la saisie de vente : la table, plus la
    // dérogation agent encore en vigueur (voir Role::can_enter_sale).
    pub async fn require_sale_entry(&self, user: &User) -> Result<Role, AppError> {
        let role = self
            .resolve_role(user)
            .await
            .ok_or(AppError::AccessDenied(Permission::AddSale.slug()))?;

        if !role.can_enter_sale() {
            return Err(AppError::AccessDenied(Permission::AddSale.slug()));
        }

        Ok(role)
    }
}
