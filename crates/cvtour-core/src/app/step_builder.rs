//! StepBuilder - ページに存在する要素からツアーのステップ列を組み立てる
//!
//! # 組み立て規則
//! 1. 先頭は固定のイントロ（アンカーなし）
//! 2. テンプレート表を上から順に 1 回だけ走査し、セレクタが見つかった行だけ
//!    アンカー付きステップにする（見つからない行は丸ごと省く）
//! 3. 末尾は固定の締めくくり（アンカーなし）
//!
//! 表の順序はアプリの使い方の流れ（連絡先 → 要約 → セクション → 調整 →
//! 出力）に合わせてあり、並べ替えはしません。

use crate::domain::{ElementRef, Placement, StepDescriptor};
use crate::ports::DocumentQuery;

/// Which element a matched selector anchors the step to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget {
    /// The matched element itself.
    Element,
    /// The matched element's parent, or the element when it has none.
    ParentOrElement,
}

/// One optional row of the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTemplate {
    pub selector: String,
    pub target: AnchorTarget,
    pub body: String,
    pub placement: Placement,
}

impl StepTemplate {
    pub fn new(selector: &str, target: AnchorTarget, body: &str, placement: Placement) -> Self {
        Self {
            selector: selector.to_string(),
            target,
            body: body.to_string(),
            placement,
        }
    }

    fn resolve(&self, document: &dyn DocumentQuery) -> Option<ElementRef> {
        let element = document.query_selector(&self.selector)?;
        match self.target {
            AnchorTarget::Element => Some(element),
            AnchorTarget::ParentOrElement => Some(document.parent_of(&element).unwrap_or(element)),
        }
    }
}

/// Declarative tour definition: intro, optional rows, closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBuilder {
    intro: String,
    templates: Vec<StepTemplate>,
    closing: String,
}

impl StepBuilder {
    pub fn new(intro: &str, templates: Vec<StepTemplate>, closing: &str) -> Self {
        Self {
            intro: intro.to_string(),
            templates,
            closing: closing.to_string(),
        }
    }

    /// Build the step sequence for the document as it is right now.
    ///
    /// Always at least `[intro, closing]`.
    pub fn build(&self, document: &dyn DocumentQuery) -> Vec<StepDescriptor> {
        let mut steps = self.templates.iter().fold(
            vec![StepDescriptor::floating(self.intro.as_str())],
            |mut steps, template| {
                if let Some(anchor) = template.resolve(document) {
                    steps.push(StepDescriptor::anchored(
                        template.body.as_str(),
                        anchor,
                        template.placement,
                    ));
                }
                steps
            },
        );
        steps.push(StepDescriptor::floating(self.closing.as_str()));
        steps
    }
}

impl Default for StepBuilder {
    /// The CV Generator home page tour.
    fn default() -> Self {
        Self::new(
            INTRO,
            vec![
                StepTemplate::new(
                    SELECTOR_CONTACT,
                    AnchorTarget::Element,
                    CONTACT,
                    Placement::Bottom,
                ),
                StepTemplate::new(
                    SELECTOR_SUMMARY,
                    AnchorTarget::Element,
                    SUMMARY,
                    Placement::Bottom,
                ),
                StepTemplate::new(
                    SELECTOR_SECTIONS,
                    AnchorTarget::Element,
                    SECTIONS,
                    Placement::Bottom,
                ),
                StepTemplate::new(
                    SELECTOR_CUSTOMIZE,
                    AnchorTarget::Element,
                    CUSTOMIZE,
                    Placement::Bottom,
                ),
                // The generate link sits inside a menu item; highlight the item.
                StepTemplate::new(
                    SELECTOR_GENERATE,
                    AnchorTarget::ParentOrElement,
                    GENERATE,
                    Placement::Bottom,
                ),
            ],
            CLOSING,
        )
    }
}

pub const SELECTOR_CONTACT: &str = r#"a[href="/contact"]"#;
pub const SELECTOR_SUMMARY: &str = r#"a[href="/summary"]"#;
pub const SELECTOR_SECTIONS: &str = ".nav-dropdown";
pub const SELECTOR_CUSTOMIZE: &str = r#"a[href="/personalizar"]"#;
pub const SELECTOR_GENERATE: &str = r#"a[href="/generar"]"#;

const INTRO: &str = r#"<div class="tour-step-intro">
  <h2>📄 Bienvenido a CV Generator</h2>
  <p>Tu herramienta para crear currículums profesionales adaptados a cada oferta.</p>
  <p><strong>Duración:</strong> 2 minutos</p>
</div>"#;

const CONTACT: &str = r#"<h3>📧 Paso 1: Contacto</h3>
<p>Empieza configurando tu información básica:</p>
<ul>
  <li>Nombre y email</li>
  <li>Teléfono y ubicación</li>
  <li>Enlaces (LinkedIn, GitHub)</li>
</ul>"#;

const SUMMARY: &str = r#"<h3>📝 Paso 2: Resumen</h3>
<p>Un breve párrafo sobre tu perfil profesional.</p>
<p><em>Consejo: Adáptalo según el puesto</em></p>"#;

const SECTIONS: &str = r#"<h3>📋 Paso 3: Añadir Información</h3>
<p>Completa las secciones de tu CV:</p>
<ul>
  <li>Habilidades</li>
  <li>Experiencia</li>
  <li>Proyectos</li>
  <li>Educación</li>
  <li>Cursos</li>
</ul>"#;

const CUSTOMIZE: &str = r#"<h3>🎯 Paso 4: Personalizar</h3>
<p><strong>¡Lo más importante!</strong></p>
<p>Adapta tu CV para cada oferta:</p>
<ul>
  <li>Selecciona elementos relevantes</li>
  <li>Reordena por importancia</li>
  <li>Guarda como plantilla</li>
</ul>"#;

const GENERATE: &str = r#"<h3>📄 Paso 5: Generar y Descargar</h3>
<p>Descarga tu CV en dos formatos:</p>
<ul>
  <li><strong>Markdown:</strong> Para web/GitHub</li>
  <li><strong>Texto:</strong> Para portales de empleo</li>
</ul>"#;

const CLOSING: &str = r#"<div class="tour-step-intro">
  <h2>🎉 ¡Listo!</h2>
  <p>Ya conoces las funcionalidades principales.</p>
  <div style="margin-top: 20px; text-align: left;">
    <strong>Próximos pasos:</strong>
    <ol>
      <li>Configura tu contacto</li>
      <li>Añade experiencia</li>
      <li>Personaliza según la oferta</li>
      <li>¡Descarga tu CV!</li>
    </ol>
  </div>
  <p style="margin-top: 20px;"><strong>💪 ¡Mucha suerte!</strong></p>
</div>"#;
