//! Build and install drivers.
//!
//! Carthage ships a Makefile; building and installing the patched tool is a
//! matter of invoking its `installables` and `install` targets from the
//! checkout root. Output is streamed straight through so the operator can
//! watch the (long) Swift build. Where the final binaries land is the
//! Makefile's business, not ours.

use crate::error::{Error, Result};
use crate::fetch::Checkout;
use crate::process;

/// Run `make installables` in the checkout.
pub fn build(checkout: &Checkout) -> Result<()> {
    let status = process::run_streamed("make", &["installables"], checkout.root())?;

    if !status.success() {
        return Err(Error::BuildFailed {
            code: status.code(),
        });
    }

    Ok(())
}

/// Run `make install` in the checkout.
pub fn install(checkout: &Checkout) -> Result<()> {
    let status = process::run_streamed("make", &["install"], checkout.root())?;

    if !status.success() {
        return Err(Error::InstallFailed {
            code: status.code(),
        });
    }

    Ok(())
}
