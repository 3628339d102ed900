// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::access::Permission,
    models::auth::User,
};

/// 1. Le trait qui définit une exigence de permission
pub trait PermissionDef: Send + Sync + 'static {
    fn required() -> Permission;
}

/// 2. L'extracteur (gardien) : résout le rôle et vérifie la table
/// statique. Rôle non résolu = permission refusée, jamais un accès
/// par défaut.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        // A. L'utilisateur doit avoir été posé par auth_guard
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Résolution du rôle + contrôle dans la table statique
        app_state
            .access_service
            .require(&user, T::required())
            .await
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DÉFINITION DES EXIGENCES (TYPES)
// ---

macro_rules! permission_marker {
    ($name:ident, $permission:expr) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn required() -> Permission {
                $permission
            }
        }
    };
}

permission_marker!(PermViewDashboard, Permission::ViewDashboard);
permission_marker!(PermViewSales, Permission::ViewSales);
permission_marker!(PermCashInSale, Permission::CashInSale);
permission_marker!(PermControlBalance, Permission::ControlBalance);
permission_marker!(PermControlExpense, Permission::ControlExpense);
permission_marker!(PermControlDebt, Permission::ControlDebt);
permission_marker!(PermViewCrm, Permission::ViewCrm);
permission_marker!(PermCreateProspects, Permission::CreateProspects);
permission_marker!(PermManageQuotes, Permission::ManageQuotes);
permission_marker!(PermManageOmra, Permission::ManageOmra);
permission_marker!(PermManageDevices, Permission::ManageDevices);
permission_marker!(PermManageRoles, Permission::ManageRoles);
permission_marker!(PermViewNotifications, Permission::ViewNotifications);
permission_marker!(PermUseAssistant, Permission::UseAssistant);
permission_marker!(PermExportDocuments, Permission::ExportDocuments);
