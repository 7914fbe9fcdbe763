// crates/sv_report/src/render_html.rs
//
// Deterministic, offline HTML renderer. Single embedded template, no external
// assets. Content fields are auto-escaped (template name ends in ".html").

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ r.title }}</title>
<h1>{{ r.title }}</h1>
<p>Source: {{ r.source }} · Round cap: {{ r.round_cap }} · Games: {{ r.totals.games }} · Failed: {{ r.totals.failures }}</p>

<h2>By rule</h2>
<table>
  <tr><th>Rule</th><th>Games</th><th>Mean rounds</th><th>Max rounds</th><th>Hit cap</th>
      <th>Winner changed</th><th>Mean score shift</th><th>Shift / final score</th></tr>
  {%- for s in r.rules %}
  <tr><td>{{ s.rule }}</td><td>{{ s.games }}</td><td>{{ s.mean_rounds }}</td><td>{{ s.max_rounds }}</td>
      <td>{{ s.non_converged }}</td><td>{{ s.different_winners }} ({{ s.different_winners_pct }})</td>
      <td>{{ s.mean_score_shift }}</td><td>{{ s.score_shift_pct }}</td></tr>
  {%- endfor %}
</table>
{% if r.games %}
<h2>By game</h2>
<table>
  <tr><th>Game</th><th>Rule</th><th>Rounds</th><th>Truthful winner (score)</th><th>Final winner (score)</th></tr>
  {%- for g in r.games %}
  <tr><td>{{ g.game }}</td><td>{{ g.rule }}</td><td>{{ g.rounds }}{% if not g.converged %} (cap){% endif %}</td>
      <td>{{ g.initial_winner }} ({{ g.initial_score }})</td><td>{{ g.final_winner }} ({{ g.final_score }})</td></tr>
  {%- endfor %}
</table>
{% endif %}
{% if r.failures %}
<h2>Failed games</h2>
<ul>
  {%- for f in r.failures %}
  <li><code>{{ f.game }}</code>: {{ f.error }}</li>
  {%- endfor %}
</ul>
{% endif %}
</html>
"#;

/// Render a compact HTML summary using the embedded template.
pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;
    tmpl.render(context! { r => model })
        .map_err(|_| ReportError::Template("render_html"))
}
