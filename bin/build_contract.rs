//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use nft_loan_vault;

fn main() {
    // Compilation of LoanVault, PaymentToken and CollateralNft is driven by odra-build
}
