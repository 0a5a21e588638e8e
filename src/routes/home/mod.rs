use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};
use htmlescape::encode_minimal;

use crate::domain::{Field, SubmissionResult};
use crate::routes::{handle_submission, into_submission_result, FormData};
use crate::startup::AppState;

pub async fn home() -> (StatusCode, Html<String>) {
    (StatusCode::OK, render_form(&SubmissionResult::idle()))
}

// POST /: the browser form posts back here and gets the page re-rendered
// with the outcome of the submission.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form_data): Form<FormData>,
) -> (StatusCode, Html<String>) {
    let outcome = handle_submission(&state.db_pool, form_data).await;
    let (status, result) = into_submission_result(outcome);
    (status, render_form(&result))
}

fn field_error_html(result: &SubmissionResult, field: Field) -> String {
    match result.first_error(field) {
        Some(message) => format!(
            r#"<p style="color: red">{}</p>"#,
            encode_minimal(message)
        ),
        None => String::new(),
    }
}

pub fn render_form(result: &SubmissionResult) -> Html<String> {
    let name_error = field_error_html(result, Field::Name);
    let email_error = field_error_html(result, Field::Email);
    let message_html = if result.message().is_empty() {
        String::new()
    } else {
        let color = if result.success() { "green" } else { "red" };
        format!(
            r#"<p style="color: {color}">{}</p>"#,
            encode_minimal(result.message())
        )
    };
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Subscribe</title>
</head>
<body>
    <form action="/" method="post"
        onsubmit="const b = this.querySelector('button'); b.disabled = true; b.textContent = 'Submitting...';">
        <h2>Subscribe</h2>
        <div>
            <label for="name">Name:</label>
            <input type="text" id="name" name="name">
            {name_error}
        </div>
        <div>
            <label for="email">Email:</label>
            <input type="email" id="email" name="email">
            {email_error}
        </div>
        <button type="submit">Submit</button>
        {message_html}
    </form>
</body>
</html>"#,
    ))
}
