//! Report rendering: header block first, then the body.

use cv_protocol::{Report, ReportBody};

use crate::dispatcher::Dispatcher;

/// Render a completed command's report through the dispatcher.
pub async fn send_report(dispatcher: &dyn Dispatcher, namespace: &str, report: &Report) {
    let header =
        dispatcher.command_response_header(namespace, &report.subcommand, &report.fields);
    dispatcher.send_blocks(header).await;
    match &report.body {
        ReportBody::Table { header, rows } => {
            dispatcher.send_large_table(header, rows).await;
        }
        ReportBody::Snippet(text) => {
            dispatcher.send_snippet(text).await;
        }
        ReportBody::None => {}
    }
}
