//! HTML rendering of the single demo page.
//!
//! Rendering is a pure function of the view; the same view always produces
//! the same markup.

use std::fmt::Write;

use crate::ml::{Label, ModelKind};
use crate::service::{ModelSelection, Notice, Severity};

const TITLE: &str = "Email Spam Detector";

const STYLE: &str = "\
body{font-family:sans-serif;max-width:720px;margin:2em auto}\
textarea{width:100%;box-sizing:border-box}\
.not-spam{color:black;font-weight:bold}\
.spam{color:red;font-weight:bold}\
.notice.warning{color:#8a6d3b}\
.notice.error{color:#a94442}\
button.selected{outline:2px solid #337ab7}";

/// Everything the page shows.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Text currently in the input area.
    pub text: String,
    /// The session's model choice.
    pub selection: ModelSelection,
    /// Outcome of the last submit, if this render follows one.
    pub outcome: Option<Result<Label, Notice>>,
    /// Artifact load failures, shown on every render.
    pub load_notices: Vec<Notice>,
}

impl PageView {
    pub fn new(selection: ModelSelection, load_notices: Vec<Notice>) -> Self {
        Self {
            selection,
            load_notices,
            ..Self::default()
        }
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_outcome(mut self, outcome: Result<Label, Notice>) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

/// Render the page.
pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{TITLE}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{TITLE}</h1>");

    for notice in &view.load_notices {
        push_notice(&mut html, notice);
    }

    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    let selected = view
        .selection
        .map(ModelKind::display_name)
        .unwrap_or("none");
    let _ = writeln!(html, "<p>Selected model: <strong>{selected}</strong></p>");
    html.push_str("<p>\n");
    for kind in ModelKind::ALL {
        let class = if view.selection == Some(kind) {
            " class=\"selected\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<button type=\"submit\" formaction=\"/select/{}\"{class}>{}</button>",
            kind.tag(),
            kind.display_name()
        );
    }
    html.push_str("</p>\n");
    let _ = writeln!(
        html,
        "<textarea name=\"text\" rows=\"8\" placeholder=\"Enter some text\">{}</textarea>",
        escape_html(&view.text)
    );
    html.push_str("<p><button type=\"submit\">Predict</button></p>\n");
    html.push_str("</form>\n");

    html.push_str("<div id=\"output\">\n");
    match &view.outcome {
        Some(Ok(label)) => {
            let _ = writeln!(
                html,
                "<p>Prediction: <span class=\"{}\">{}</span></p>",
                label.css_class(),
                label.display_text()
            );
        }
        Some(Err(notice)) => push_notice(&mut html, notice),
        None => {}
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn push_notice(html: &mut String, notice: &Notice) {
    let severity = match notice.severity() {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    let _ = writeln!(
        html,
        "<p class=\"notice {severity}\">{}</p>",
        escape_html(&notice.message())
    );
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactKind;

    #[test]
    fn test_empty_page() {
        let html = render(&PageView::default());

        assert!(html.contains("<title>Email Spam Detector</title>"));
        assert!(html.contains(">Naïve Bayes</button>"));
        assert!(html.contains(">Logistic Regression</button>"));
        assert!(html.contains("Selected model: <strong>none</strong>"));
        assert!(!html.contains("class=\"selected\""));
        assert!(!html.contains("Prediction:"));
    }

    #[test]
    fn test_label_styling() {
        let spam = render(&PageView::default().with_outcome(Ok(Label::Spam)));
        assert!(spam.contains("<span class=\"spam\">Spam</span>"));

        let ham = render(&PageView::default().with_outcome(Ok(Label::NotSpam)));
        assert!(ham.contains("<span class=\"not-spam\">Not Spam</span>"));
    }

    #[test]
    fn test_selection_and_text() {
        let view = PageView::new(Some(ModelKind::LogisticRegression), Vec::new())
            .with_text("<script>alert('x')</script>");
        let html = render(&view);

        assert!(html.contains("formaction=\"/select/lr\" class=\"selected\""));
        assert!(html.contains("Selected model: <strong>Logistic Regression</strong>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_notices() {
        let load_failure = Notice::ArtifactLoad {
            kind: ArtifactKind::Vectorizer,
            reason: "No such file or directory".to_string(),
        };
        let view = PageView::new(None, vec![load_failure]).with_outcome(Err(Notice::EmptyInput));
        let html = render(&view);

        assert!(html.contains("<p class=\"notice error\">Error loading the vectorizer model file"));
        assert!(html.contains("<p class=\"notice warning\">Please enter some text.</p>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let view = PageView::new(Some(ModelKind::NaiveBayes), Vec::new())
            .with_text("hello")
            .with_outcome(Ok(Label::NotSpam));
        assert_eq!(render(&view), render(&view));
    }
}
