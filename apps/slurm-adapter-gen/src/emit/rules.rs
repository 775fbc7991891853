//! `validation/rules.rs`: the `Validate` impls of the input types.

use std::collections::BTreeSet;

use super::{HEADER, use_line};
use crate::config::{Ordered, Rules};

/// Statements of one `validate` body; every one but the last ends in `?;`.
fn steps(rules: &Rules, helpers: &mut BTreeSet<&'static str>) -> Vec<Vec<String>> {
    let mut steps = Vec::new();
    for field in &rules.require {
        helpers.insert("require");
        steps.push(vec![format!("require(\"{field}\", &self.{field})")]);
    }
    if !rules.at_least_one.is_empty() {
        helpers.insert("at_least_one");
        let mut step = vec!["at_least_one(&[".to_owned()];
        step.extend(
            rules
                .at_least_one
                .iter()
                .map(|field| format!("    (\"{field}\", self.{field}.is_some()),")),
        );
        step.push("])".to_owned());
        steps.push(step);
    }
    if let Some(check) = &rules.domain {
        helpers.insert("domain");
        steps.push(vec![format!("domain::{check}(self)")]);
    }
    steps
}

pub fn emit(validation: &Ordered<Rules>) -> String {
    let mut helpers = BTreeSet::from(["Validate", "Violation"]);
    let mut blocks = Vec::new();
    for (ty, rules) in validation.iter() {
        let steps = steps(rules, &mut helpers);
        let mut block = vec![
            format!("impl Validate for {ty} {{"),
            "    fn validate(&self) -> Result<(), Violation> {".to_owned(),
        ];
        if steps.is_empty() {
            block.push("        Ok(())".to_owned());
        }
        let last = steps.len().saturating_sub(1);
        for (i, step) in steps.iter().enumerate() {
            let end = step.len() - 1;
            for (j, line) in step.iter().enumerate() {
                let suffix = if i != last && j == end { "?;" } else { "" };
                block.push(format!("        {line}{suffix}"));
            }
        }
        block.extend(["    }".to_owned(), "}".to_owned()]);
        blocks.push(block.join("\n"));
    }
    [
        HEADER.to_owned(),
        String::new(),
        use_line("slurm_client_sdk", validation.keys()),
        String::new(),
        use_line("super", helpers),
        String::new(),
        blocks.join("\n\n"),
        String::new(),
    ]
    .join("\n")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn checks_chain_with_question_marks() {
        let validation: Ordered<Rules> = serde_saphyr::from_str(
            "JobCreate: { require: [script, name], domain: job_create }\n\
             NodeUpdate: { at_least_one: [state, reason] }\n",
        )
        .unwrap();
        let text = emit(&validation);
        assert!(text.contains("use slurm_client_sdk::{JobCreate, NodeUpdate};"));
        assert!(text.contains("use super::{Validate, Violation, at_least_one, domain, require};"));
        assert!(text.contains(
            "        require(\"script\", &self.script)?;\n        \
             require(\"name\", &self.name)?;\n        domain::job_create(self)\n"
        ));
        assert!(text.contains(
            "        at_least_one(&[\n            (\"state\", self.state.is_some()),\n            \
             (\"reason\", self.reason.is_some()),\n        ])\n    }"
        ));
    }
}
