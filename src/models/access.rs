// src/models/access.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Le rôle d'un utilisateur (zéro ou un rôle actif par compte).
// Le rôle détermine l'intégralité des permissions : il n'existe
// aucune ACL par ressource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,           // Gérant : accès complet
    Cashier,           // Caissier : encaissements et contrôle financier
    SuperAgent,        // Agent senior : ventes + CRM
    Agent,             // Agent : saisie et consultation
    SupplierAccelaero, // Fournisseur : consultation de son propre solde
    SupplierTtp,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Manager,
        Role::Cashier,
        Role::SuperAgent,
        Role::Agent,
        Role::SupplierAccelaero,
        Role::SupplierTtp,
    ];
}

// Une permission : un tag d'une énumération fermée, dérivé du rôle
// via la table statique ci-dessous. Jamais stocké par utilisateur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    AddSale,
    ViewSales,
    CashInSale,
    ControlBalance,
    ControlExpense,
    ControlDebt,
    ViewCrm,
    CreateProspects,
    ManageQuotes,
    ManageOmra,
    ManageDevices,
    ManageRoles,
    ViewNotifications,
    UseAssistant,
    ExportDocuments,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ViewDashboard,
        Permission::AddSale,
        Permission::ViewSales,
        Permission::CashInSale,
        Permission::ControlBalance,
        Permission::ControlExpense,
        Permission::ControlDebt,
        Permission::ViewCrm,
        Permission::CreateProspects,
        Permission::ManageQuotes,
        Permission::ManageOmra,
        Permission::ManageDevices,
        Permission::ManageRoles,
        Permission::ViewNotifications,
        Permission::UseAssistant,
        Permission::ExportDocuments,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "dashboard:view",
            Permission::AddSale => "sales:add",
            Permission::ViewSales => "sales:view",
            Permission::CashInSale => "sales:cash_in",
            Permission::ControlBalance => "balance:control",
            Permission::ControlExpense => "expenses:control",
            Permission::ControlDebt => "debts:control",
            Permission::ViewCrm => "crm:view",
            Permission::CreateProspects => "crm:create_prospects",
            Permission::ManageQuotes => "quotes:manage",
            Permission::ManageOmra => "omra:manage",
            Permission::ManageDevices => "devices:manage",
            Permission::ManageRoles => "roles:manage",
            Permission::ViewNotifications => "notifications:view",
            Permission::UseAssistant => "assistant:use",
            Permission::ExportDocuments => "documents:export",
        }
    }
}

// ---
// LA TABLE STATIQUE ROLE -> PERMISSIONS
// ---
// Unique source de vérité pour les contrôles d'accès. Les wrappers
// (`can_add_sale`, etc.) doivent rester cohérents avec elle — une
// divergence est une classe de défaut testée explicitement.

const MANAGER_PERMS: &[Permission] = &Permission::ALL;

const CASHIER_PERMS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewSales,
    Permission::CashInSale,
    Permission::ControlBalance,
    Permission::ControlExpense,
    Permission::ControlDebt,
    Permission::ViewNotifications,
    Permission::ExportDocuments,
];

const SUPER_AGENT_PERMS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::AddSale,
    Permission::ViewSales,
    Permission::ViewCrm,
    Permission::CreateProspects,
    Permission::ManageQuotes,
    Permission::ViewNotifications,
    Permission::UseAssistant,
    Permission::ExportDocuments,
];

const AGENT_PERMS: &[Permission] = &[
    Permission::ViewSales,
    Permission::ViewCrm,
    Permission::CreateProspects,
    Permission::ViewNotifications,
];

const SUPPLIER_PERMS: &[Permission] = &[Permission::ViewNotifications];

impl Role {
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Manager => MANAGER_PERMS,
            Role::Cashier => CASHIER_PERMS,
            Role::SuperAgent => SUPER_AGENT_PERMS,
            Role::Agent => AGENT_PERMS,
            Role::SupplierAccelaero | Role::SupplierTtp => SUPPLIER_PERMS,
        }
    }

    pub fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    // --- Wrappers de commodité sur la table statique ---

    pub fn can_add_sale(self) -> bool {
        self.has_permission(Permission::AddSale)
    }

    pub fn can_control_balance(self) -> bool {
        self.has_permission(Permission::ControlBalance)
    }

    pub fn can_cash_in(self) -> bool {
        self.has_permission(Permission::CashInSale)
    }

    pub fn is_supplier(self) -> bool {
        matches!(self, Role::SupplierAccelaero | Role::SupplierTtp)
    }

    // Le canal dont un fournisseur peut consulter le solde
    pub fn supplier_system(self) -> Option<crate::models::sales::SaleSystem> {
        use crate::models::sales::SaleSystem;
        match self {
            Role::SupplierAccelaero => Some(SaleSystem::Accelaero),
            Role::SupplierTtp => Some(SaleSystem::Ttp),
            _ => None,
        }
    }

    // Les agents gardent l'accès direct à la saisie de vente pendant la
    // migration de la matrice de permissions, bien que `can_add_sale`
    // retourne false pour eux.
    pub fn can_enter_sale(self) -> bool {
        self.can_add_sale() || self == Role::Agent
    }
}

// ---
// ANCIEN SCHÉMA : correspondance e-mail -> rôle
// ---
// Chemin de migration conservé pour les comptes créés avant la table
// `user_roles`. Consulté uniquement quand aucune ligne n'existe ;
// à supprimer une fois tous les comptes migrés.
pub fn legacy_role_for_email(email: &str) -> Option<Role> {
    match email {
        "gerant@ziyara-voyages.dz" => Some(Role::Manager),
        "caisse@ziyara-voyages.dz" => Some(Role::Cashier),
        "amine@ziyara-voyages.dz" => Some(Role::SuperAgent),
        "comptoir@ziyara-voyages.dz" => Some(Role::Agent),
        "accelaero@ziyara-voyages.dz" => Some(Role::SupplierAccelaero),
        "ttp@ziyara-voyages.dz" => Some(Role::SupplierTtp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Table attendue, maintenue à la main : toute divergence entre
    // `has_permission` et cette liste fait échouer le test exhaustif.
    fn expected(role: Role, permission: Permission) -> bool {
        use Permission::*;
        match role {
            Role::Manager => true,
            Role::Cashier => matches!(
                permission,
                ViewDashboard | ViewSales | CashInSale | ControlBalance | ControlExpense
                    | ControlDebt | ViewNotifications | ExportDocuments
            ),
            Role::SuperAgent => matches!(
                permission,
                ViewDashboard | AddSale | ViewSales | ViewCrm | CreateProspects | ManageQuotes
                    | ViewNotifications | UseAssistant | ExportDocuments
            ),
            Role::Agent => matches!(
                permission,
                ViewSales | ViewCrm | CreateProspects | ViewNotifications
            ),
            Role::SupplierAccelaero | Role::SupplierTtp => {
                matches!(permission, ViewNotifications)
            }
        }
    }

    #[test]
    fn permission_table_matches_manual_lookup_for_every_pair() {
        for role in Role::ALL {
            for permission in Permission::ALL {
                assert_eq!(
                    role.has_permission(permission),
                    expected(role, permission),
                    "divergence pour ({:?}, {:?})",
                    role,
                    permission
                );
            }
        }
    }

    #[test]
    fn convenience_wrappers_stay_consistent_with_the_table() {
        for role in Role::ALL {
            assert_eq!(role.can_add_sale(), role.has_permission(Permission::AddSale));
            assert_eq!(
                role.can_control_balance(),
                role.has_permission(Permission::ControlBalance)
            );
            assert_eq!(role.can_cash_in(), role.has_permission(Permission::CashInSale));
        }
    }

    #[test]
    fn agent_cannot_add_sale_but_still_enters_the_sale_form() {
        assert!(!Role::Agent.can_add_sale());
        assert!(Role::Agent.can_enter_sale());
        // Les autres rôles passent par la table, sans dérogation
        assert!(Role::SuperAgent.can_enter_sale());
        assert!(!Role::Cashier.can_enter_sale());
        assert!(!Role::SupplierTtp.can_enter_sale());
    }

    #[test]
    fn suppliers_are_suppliers_and_nothing_more() {
        for role in [Role::SupplierAccelaero, Role::SupplierTtp] {
            assert!(role.is_supplier());
            assert_eq!(role.permissions(), &[Permission::ViewNotifications][..]);
        }
        assert!(!Role::Manager.is_supplier());
    }

    #[test]
    fn permission_slugs_are_unique() {
        let mut slugs: Vec<&str> = Permission::ALL.iter().map(|p| p.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), Permission::ALL.len());
    }

    #[test]
    fn legacy_email_map_only_knows_migrated_accounts() {
        assert_eq!(legacy_role_for_email("gerant@ziyara-voyages.dz"), Some(Role::Manager));
        assert_eq!(legacy_role_for_email("inconnu@exemple.dz"), None);
    }
}
