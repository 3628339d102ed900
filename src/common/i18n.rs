// Catalogue de messages : fr (défaut), en, ar.
// L'agence travaille en français et en arabe ; l'anglais sert de repli
// pour les intégrations.

#[derive(Clone, Default)]
pub struct I18nStore;

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, lang: &str, key: &str) -> String {
        let message = match key {
            "validation_failed" => match lang {
                "en" => "One or more fields are invalid.",
                "ar" => "حقل واحد أو أكثر غير صالح.",
                _ => "Un ou plusieurs champs sont invalides.",
            },
            "email_already_exists" => match lang {
                "en" => "This e-mail address is already in use.",
                "ar" => "هذا البريد الإلكتروني مستخدم بالفعل.",
                _ => "Cette adresse e-mail est déjà utilisée.",
            },
            "invalid_credentials" => match lang {
                "en" => "Invalid e-mail or password.",
                "ar" => "البريد الإلكتروني أو كلمة المرور غير صحيحة.",
                _ => "E-mail ou mot de passe invalide.",
            },
            "invalid_token" => match lang {
                "en" => "Authentication token missing or invalid.",
                "ar" => "رمز المصادقة مفقود أو غير صالح.",
                _ => "Token d'authentification absent ou invalide.",
            },
            "user_not_found" => match lang {
                "en" => "User not found.",
                "ar" => "المستخدم غير موجود.",
                _ => "Utilisateur introuvable.",
            },
            "access_denied" => match lang {
                "en" => "You do not have the required permission for this action.",
                "ar" => "ليست لديك الصلاحية المطلوبة لهذا الإجراء.",
                _ => "Vous n'avez pas la permission requise pour cette action.",
            },
            "device_banned" => match lang {
                "en" => "This device has been blocked. Contact your manager.",
                "ar" => "تم حظر هذا الجهاز. اتصل بالمدير.",
                _ => "Cet appareil a été bloqué. Contactez votre gérant.",
            },
            "not_found" => match lang {
                "en" => "Resource not found.",
                "ar" => "المورد غير موجود.",
                _ => "Ressource introuvable.",
            },
            "payment_exceeds_due" => match lang {
                "en" => "The payment exceeds the remaining amount due.",
                "ar" => "الدفعة تتجاوز المبلغ المتبقي المستحق.",
                _ => "Le paiement dépasse le montant restant dû.",
            },
            "unique_violation" => match lang {
                "en" => "A record with these values already exists.",
                "ar" => "يوجد سجل بهذه القيم بالفعل.",
                _ => "Un enregistrement avec ces valeurs existe déjà.",
            },
            "assistant_unavailable" => match lang {
                "en" => "The assistant is unavailable right now. Try again later.",
                "ar" => "المساعد غير متاح حاليًا. حاول لاحقًا.",
                _ => "L'assistant est indisponible pour le moment. Réessayez plus tard.",
            },
            _ => match lang {
                "en" => "An unexpected error occurred.",
                "ar" => "حدث خطأ غير متوقع.",
                _ => "Une erreur inattendue s'est produite.",
            },
        };
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_french_by_default() {
        let store = I18nStore::new();
        assert_eq!(store.resolve("fr", "device_banned"), "Cet appareil a été bloqué. Contactez votre gérant.");
        // Une langue inconnue retombe sur le français
        assert_eq!(store.resolve("de", "device_banned"), store.resolve("fr", "device_banned"));
    }

    #[test]
    fn unknown_key_falls_back_to_generic_message() {
        let store = I18nStore::new();
        assert_eq!(store.resolve("en", "no_such_key"), "An unexpected error occurred.");
    }
}
