//! Render pass context

use crate::i18n::I18n;
use crate::model::ContentModel;

/// Everything a node needs to render: the borrowed model and translations.
///
/// Nodes never store the model; a context only lives for one pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub model: &'a dyn ContentModel,
    pub i18n: &'a I18n,
}

impl<'a> RenderContext<'a> {
    pub fn new(model: &'a dyn ContentModel, i18n: &'a I18n) -> Self {
        Self { model, i18n }
    }

    /// Same translations, different model
    pub fn with_model(&self, model: &'a dyn ContentModel) -> Self {
        Self {
            model,
            i18n: self.i18n,
        }
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("model", &self.model.id())
            .field("locale", &self.i18n.locale())
            .finish()
    }
}
