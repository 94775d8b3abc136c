//! Validate the content tree

use anyhow::Result;

use crate::content::ContentKind;
use crate::Site;

/// Check updates and pages for problems. Returns the number of findings.
pub fn run(site: &Site) -> Result<usize> {
    let repo = site.repository();

    let mut findings = Vec::new();
    for kind in [ContentKind::Updates, ContentKind::Pages] {
        for finding in repo.audit(kind) {
            findings.push(format!("{}: {}", kind.dir_name(), finding));
        }
    }

    if findings.is_empty() {
        println!("Content tree is clean.");
    } else {
        println!("Found {} problem(s):", findings.len());
        for finding in &findings {
            println!("  {}", finding);
        }
    }

    Ok(findings.len())
}
