//! Text of the first-visit welcome overlay.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeContent {
    pub icon: String,
    pub title: String,
    pub lead: String,
    pub question: String,
    pub start_label: String,
    pub skip_label: String,
    pub dont_show_again_label: String,
}

impl Default for WelcomeContent {
    fn default() -> Self {
        Self {
            icon: "📄".to_string(),
            title: "Bienvenido a CV Generator".to_string(),
            lead: "Tu herramienta para crear currículums profesionales personalizados.".to_string(),
            question: "¿Quieres un recorrido rápido de 2 minutos?".to_string(),
            start_label: "🚀 Sí, empezar".to_string(),
            skip_label: "Ahora no".to_string(),
            dont_show_again_label: "No volver a mostrar".to_string(),
        }
    }
}
