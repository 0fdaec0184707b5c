//! Interactive HTML view

use minijinja::{Environment, context};

use super::ReportView;
use crate::error::Result;
use crate::model::Snapshot;

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../../templates/report.html");

/// Render a snapshot as a standalone HTML page
pub fn render_html(snapshot: &Snapshot) -> Result<String> {
    render_view(&ReportView::build(snapshot))
}

pub(crate) fn render_view(view: &ReportView) -> Result<String> {
    // `.html` names get HTML auto-escaping
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;

    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(context! { report => view })?)
}
