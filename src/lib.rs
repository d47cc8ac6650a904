#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Token contracts the vault consumes
pub mod token;
pub mod nft;
pub mod errors;
pub mod events;

// NFT-collateralized loan vault
pub mod vault;
