//! Signing identity derived from a private key.

use alloy::{
    network::EthereumWallet, primitives::Address, signers::local::PrivateKeySigner,
};

use crate::error::{AppError, Result};

/// Wallet manager holding the local signer used for transactions.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        if key.is_empty() {
            return Err(AppError::Wallet("Private key is empty".into()));
        }

        let signer: PrivateKeySigner = key.parse()?;
        let address = signer.address();

        tracing::info!(address = %address, "Wallet connected");

        Ok(Self { signer, address })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the signer.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Network wallet for a signing provider.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::network::NetworkWallet;

    // First Hardhat/Anvil development account (DO NOT use in production!)
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_from_private_key_with_and_without_prefix() {
        let with_prefix = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let without_prefix =
            WalletManager::from_private_key(TEST_PRIVATE_KEY.trim_start_matches("0x")).unwrap();

        let addr_str = format!("{:?}", with_prefix.address()).to_lowercase();
        assert_eq!(addr_str, TEST_ADDRESS);
        assert_eq!(with_prefix.address(), without_prefix.address());
    }

    #[test]
    fn test_wallet_invalid_private_key() {
        for key in ["0x1234", "0xZZZZ", "", "0x", "invalid_key"] {
            let result = WalletManager::from_private_key(key);
            assert!(matches!(result, Err(AppError::Wallet(_))), "key {:?} should be rejected", key);
        }
    }

    #[test]
    fn test_wallet_signer_matches_address() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.signer().address(), wallet.address());
    }

    #[test]
    fn test_ethereum_wallet_default_signer() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let network_wallet = wallet.ethereum_wallet();

        assert_eq!(
            NetworkWallet::<alloy::network::Ethereum>::default_signer_address(&network_wallet),
            wallet.address()
        );
    }

    #[test]
    fn test_wallet_debug_hides_key() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", wallet);

        assert!(debug_str.contains("WalletManager"));
        assert!(
            !debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
        );
    }
}
