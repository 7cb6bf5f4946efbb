//! One entry point per built-in provider.

use crate::collaborators::{Compiler, Renderer};
use crate::options::{ExportOptions, ExportResult};
use crate::pipeline::Exporter;
use mailexport_core::ExportError;
use mailexport_presets::ids;

macro_rules! provider_entry_points {
    ($($(#[$doc:meta])* $fn_name:ident => $id:expr;)+) => {
        impl<R, C> Exporter<'_, R, C>
        where
            C: Compiler,
        {
            $(
                $(#[$doc])*
                pub async fn $fn_name<D>(
                    &self,
                    document: &D,
                    options: ExportOptions,
                ) -> Result<ExportResult, ExportError>
                where
                    D: ?Sized,
                    R: Renderer<D>,
                {
                    self.export(document, $id, options).await
                }
            )+
        }
    };
}

provider_entry_points! {
    /// Export with the Mailchimp preset.
    export_mailchimp => ids::MAILCHIMP;
    /// Export with the SendGrid preset.
    export_sendgrid => ids::SENDGRID;
    /// Export with the Brevo preset.
    export_brevo => ids::BREVO;
    /// Export with the Postmark preset.
    export_postmark => ids::POSTMARK;
    /// Export with the Mailgun preset.
    export_mailgun => ids::MAILGUN;
    /// Export with the pass-through handlebars preset.
    export_handlebars => ids::HANDLEBARS;
}
