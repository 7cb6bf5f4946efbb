//! The export orchestrator.
//!
//! Stages run in a fixed order:
//! resolve → render → strip → merge tags → compile → strip → post-process → wrap.

use crate::collaborators::{CompileOutput, Compiler, Renderer};
use crate::options::{ExportOptions, ExportResult};
use mailexport_core::{ExportError, strip_editor_artifacts, transform_merge_tags};
use mailexport_presets::{PresetRef, PresetRegistry};

/// Runs documents through a renderer and compiler for a target provider.
///
/// Holds no per-call state, so one exporter can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Exporter<'r, R, C> {
    renderer: R,
    compiler: C,
    registry: &'r PresetRegistry,
}

impl<R, C> Exporter<'static, R, C> {
    /// Create an exporter backed by the built-in preset registry.
    pub fn new(renderer: R, compiler: C) -> Self {
        Self {
            renderer,
            compiler,
            registry: PresetRegistry::builtin(),
        }
    }
}

impl<'r, R, C> Exporter<'r, R, C> {
    /// Use a caller-owned registry for identifier lookups.
    pub fn with_registry(self, registry: &PresetRegistry) -> Exporter<'_, R, C> {
        Exporter {
            renderer: self.renderer,
            compiler: self.compiler,
            registry,
        }
    }

    /// The document renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The markup compiler.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// The registry identifiers are resolved against.
    pub fn registry(&self) -> &PresetRegistry {
        self.registry
    }
}

impl<R, C> Exporter<'_, R, C>
where
    C: Compiler,
{
    /// Export `document` for the selected preset.
    ///
    /// An unknown identifier fails before any rendering happens. Renderer and
    /// compiler failures are returned as-is; compiler diagnostics are reported
    /// in the result and never abort the export.
    pub async fn export<D>(
        &self,
        document: &D,
        preset: impl Into<PresetRef>,
        options: ExportOptions,
    ) -> Result<ExportResult, ExportError>
    where
        D: ?Sized,
        R: Renderer<D>,
    {
        let preset = self.registry.resolve(preset)?;
        log::debug!("Exporting for preset '{}'", preset.id());

        let markup = self
            .renderer
            .render(document)
            .map_err(ExportError::Render)?;
        log::debug!("Rendered {} bytes of layout markup", markup.len());

        // The compiler may drop or rename annotated attributes, so clean the
        // source regardless of `strip_editor_artifacts`.
        let markup = strip_editor_artifacts(&markup)?;
        let intermediate_markup =
            transform_merge_tags(&markup, preset.as_ref(), &options.merge_tag_overrides);
        log::debug!(
            "Resolved merge tags for '{}' ({} override(s))",
            preset.id(),
            options.merge_tag_overrides.len()
        );

        let CompileOutput { html, diagnostics } = self
            .compiler
            .compile(&intermediate_markup)
            .await
            .map_err(ExportError::Compile)?;
        log::debug!("Compiled {} bytes of HTML", html.len());
        if !diagnostics.is_empty() {
            log::warn!(
                "Compiler reported {} issue(s) exporting for '{}'",
                diagnostics.len(),
                preset.id()
            );
        }

        let html = if options.strip_editor_artifacts {
            strip_editor_artifacts(&html)?
        } else {
            html
        };
        let html = preset.post_process(html);
        log::debug!("Post-processed for '{}' ({} bytes)", preset.id(), html.len());
        let html = match &options.wrap {
            Some(wrap) => wrap(html),
            None => html,
        };

        Ok(ExportResult {
            html,
            intermediate_markup,
            diagnostics,
        })
    }
}

/// Export `document` once with a throwaway [`Exporter`] over the built-in
/// registry.
pub async fn export<D, R, C>(
    renderer: R,
    compiler: C,
    document: &D,
    preset: impl Into<PresetRef>,
    options: ExportOptions,
) -> Result<ExportResult, ExportError>
where
    D: ?Sized,
    R: Renderer<D>,
    C: Compiler,
{
    Exporter::new(renderer, compiler)
        .export(document, preset, options)
        .await
}
