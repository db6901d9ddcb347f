//! Server-rendered HTML for the upload and review pages.
//!
//! Every page is built from the current request only; nothing is cached
//! between uploads, so a failed upload never shows an earlier profile.

use crate::models::profile::ProfileSource;
use crate::resume::upload::RESUME_FIELD;
use crate::review::ReviewForm;

const ACCEPT: &str = ".pdf,.docx,application/pdf,application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:56rem;margin:2rem auto;padding:0 1rem;color:#1f2937}\
h1{font-size:1.75rem}h2{font-size:1.35rem;margin-top:2rem}\
form.upload{display:flex;gap:1rem;align-items:center;padding:1rem;border:2px dashed #d1d5db;border-radius:.75rem}\
button{padding:.6rem 1.4rem;border:0;border-radius:.6rem;background:#2563eb;color:#fff;font-weight:600}\
.error{margin-top:1.5rem;padding:1rem;border:1px solid #fecaca;background:#fef2f2;color:#b91c1c;border-radius:.75rem}\
.notice{color:#92400e}\
.field{margin-bottom:1.25rem}\
.field label{font-weight:600;font-size:.85rem;text-transform:uppercase;letter-spacing:.04em}\
.field .head{display:flex;justify-content:space-between;align-items:center;margin-bottom:.25rem}\
.badge{font-size:.75rem;padding:.2rem .75rem;border-radius:999px}\
.badge.auto{background:#dbeafe;color:#1e40af}.badge.filled{background:#dcfce7;color:#166534}\
.badge.review{background:#fef9c3;color:#854d0e}\
input,textarea{width:100%;box-sizing:border-box;padding:.6rem;border:1px solid #d1d5db;border-radius:.5rem}\
.field.review input,.field.review textarea{background:#fefce8;border-color:#fde68a}";

/// Minimal HTML escaping for text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Upload Your Resume</title><style>{STYLE}</style></head>\
         <body>{body}</body></html>"
    )
}

fn upload_form() -> String {
    format!(
        "<h1>Upload Your Resume</h1>\
         <p>Upload your resume in PDF or DOCX format to auto-fill your profile.</p>\
         <form class=\"upload\" method=\"post\" action=\"/review\" enctype=\"multipart/form-data\">\
         <input type=\"file\" name=\"{RESUME_FIELD}\" accept=\"{ACCEPT}\" required>\
         <button type=\"submit\">Upload &amp; Parse Resume</button></form>"
    )
}

/// Upload page, optionally with an error banner from the last attempt.
pub fn render_upload_page(error: Option<&str>) -> String {
    let banner = error
        .map(|msg| {
            format!(
                "<div class=\"error\" role=\"alert\"><strong>Error:</strong> {}</div>",
                escape_html(msg)
            )
        })
        .unwrap_or_default();
    page(&format!("{}{banner}", upload_form()))
}

/// Upload form followed by the read-only parsed profile.
pub fn render_review_page(form: &ReviewForm) -> String {
    let mut body = upload_form();
    body.push_str("<h2>Parsed Profile Information</h2>");
    match form.needs_review_count() {
        0 => {}
        1 => body.push_str("<p class=\"notice\">1 field needs review.</p>"),
        n => body.push_str(&format!("<p class=\"notice\">{n} fields need review.</p>")),
    }
    if form.source == ProfileSource::Fallback {
        body.push_str(
            "<p class=\"notice fallback\">Automatic extraction was unavailable; only contact \
             details were detected. Please review every field.</p>",
        );
    }

    for field in &form.fields {
        let value = escape_html(&field.value);
        let control = if field.multiline {
            format!("<textarea readonly rows=\"4\">{value}</textarea>")
        } else {
            format!("<input readonly value=\"{value}\">")
        };
        body.push_str(&format!(
            "<div class=\"field {class}\"><div class=\"head\"><label>{label}</label>\
             <span class=\"badge {class}\">{badge}</span></div>{control}</div>",
            class = field.status.css_class(),
            label = escape_html(field.label),
            badge = field.status.label(),
        ));
    }

    page(&body)
}
