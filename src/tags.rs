//! Version selection.
//!
//! The pipeline always builds the most recent release: tags are listed
//! sorted ascending by committer date and the last one wins. That tag is
//! then checked out. Unlike the clone, a failed checkout has no benign
//! interpretation and is always fatal.

use crate::error::{Error, Result};
use crate::fetch::Checkout;
use crate::process;

/// Select the newest tag by committer date and check it out.
///
/// Returns the tag that was checked out.
pub fn checkout_latest_tag(checkout: &Checkout) -> Result<String> {
    let tag = latest_tag(checkout)?;
    checkout_tag(checkout, &tag)?;
    Ok(tag)
}

/// The newest tag in the checkout, by committer date.
pub fn latest_tag(checkout: &Checkout) -> Result<String> {
    let output = process::run("git", &["tag", "--sort=committerdate"], checkout.root())?;

    if !output.success() {
        return Err(Error::TagListFailed {
            stderr: output.stderr.trim_end().to_string(),
        });
    }

    select_latest(&output.stdout).ok_or_else(|| Error::NoTags {
        repo: checkout.root().display().to_string(),
    })
}

/// Check out `tags/<tag>` in the working copy.
pub fn checkout_tag(checkout: &Checkout, tag: &str) -> Result<()> {
    let refspec = format!("tags/{}", tag);
    let output = process::run("git", &["checkout", &refspec], checkout.root())?;

    if !output.success() {
        return Err(Error::CheckoutFailed {
            tag: tag.to_string(),
            stderr: output.stderr.trim_end().to_string(),
        });
    }

    log::info!("checked out {}", refspec);
    Ok(())
}

/// Last non-empty line of the sorted tag listing.
fn select_latest(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .map(str::to_string)
}
