//! Terminal rendering of evaluation results

use hoaxcheck_classifiers::Evaluation;
use hoaxcheck_core::{Error, Label};
use std::fmt::Write;

/// Human-readable report of one evaluation
pub fn format_evaluation(evaluation: &Evaluation) -> String {
    let result = &evaluation.result;
    let mut out = String::new();

    let _ = writeln!(out, "Domain:      {}", evaluation.domain);
    let _ = writeln!(out, "Prediction:  {}", result.label);
    let _ = writeln!(out, "Confidence:  {:.2}", result.confidence());
    let _ = writeln!(out, "REAL:        {:.2}%", result.probability(Label::Real) * 100.0);
    let _ = writeln!(out, "HOAX:        {:.2}%", result.probability(Label::Hoax) * 100.0);

    if !evaluation.influential_terms.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Most influential terms ({}):", result.label.emphasis_tag());
        let width = evaluation
            .influential_terms
            .iter()
            .map(|t| t.term.chars().count())
            .max()
            .unwrap_or(0);
        for term in &evaluation.influential_terms {
            let _ = writeln!(out, "  {:<width$}  {:>9.4}", term.term, term.weight, width = width);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Text: {}", strip_emphasis(&evaluation.rendered_text));
    }

    out
}

/// Replace emphasis spans with `*term*` for plain terminals
pub fn strip_emphasis(rendered: &str) -> String {
    [Label::Real, Label::Hoax]
        .iter()
        .fold(rendered.to_string(), |text, label| {
            text.replace(&format!("<span class=\"{}\">", label.emphasis_tag()), "*")
        })
        .replace("</span>", "*")
}

/// Message shown to the user for each error kind
pub fn user_message(err: &Error) -> String {
    match err {
        Error::EmptyInput => "Enter the text to analyse first.".to_string(),
        Error::UnknownDomain(domain) => {
            format!("No classifier is registered for domain '{}'.", domain)
        }
        Error::ModelUnavailable { domain, .. } => format!(
            "The {} model could not be loaded. Check the model files and restart.",
            domain
        ),
        other => other.to_string(),
    }
}
