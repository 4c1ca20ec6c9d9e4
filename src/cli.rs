//! # Batch Mint CLI
use crate::{
    compose::BatchComposer,
    config::BatchConfig,
    detect::supports_batch,
    encode::{ArgSlot, CallBuilder, MintTo, SignatureCallBuilder},
    resolve::IpfsUploader,
    submit::{ProviderSubmitter, Submitter},
    types::{BatchItem, IMintableERC1155, TxOverrides},
};
use alloy::{
    network::EthereumWallet,
    primitives::{Address, Selector, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
};
use clap::Parser;
use eyre::{OptionExt, WrapErr};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, warn};
use url::Url;

/// Mints a batch of tokens in a single `multicall` transaction.
#[derive(Debug, Parser)]
#[command(author, about = "Batch mint", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, a default one will be used and stored in the working directory under
    /// `batch-mint.yaml`.
    #[arg(
        long,
        value_name = "CONFIG",
        env = "BATCH_MINT_CONFIG",
        default_value = "batch-mint.yaml"
    )]
    pub config: PathBuf,
    /// The RPC endpoint of the chain to send the batch to.
    #[arg(long = "endpoint", value_name = "RPC_ENDPOINT")]
    pub endpoint: Option<Url>,
    /// The contract the batch is executed against.
    #[arg(long, value_name = "ADDRESS")]
    pub contract: Address,
    /// The recipient of the minted tokens.
    #[arg(long, value_name = "ADDRESS", required_unless_present("signature"))]
    pub to: Option<Address>,
    /// A JSON file holding the list of items to mint.
    #[arg(long, value_name = "FILE")]
    pub items: PathBuf,
    /// Encode every item against this function signature instead of ERC-1155 `mintTo`.
    ///
    /// Example: `mintTo(address,uint256,string,uint256)`.
    #[arg(long, value_name = "SIGNATURE", requires("args"))]
    pub signature: Option<String>,
    /// An argument of `--signature`, in order.
    ///
    /// One of `$quantity`, `$tokenId`, `$locator` or a fixed value such as an address.
    #[arg(long = "arg", value_name = "ARG", requires("signature"))]
    pub args: Vec<ArgSlot>,
    /// The secret key to sign the batch transaction with.
    #[arg(long = "private-key", value_name = "SECRET_KEY", env = "BATCH_MINT_PK")]
    pub private_key: Option<String>,
    /// The metadata upload endpoint.
    #[arg(long = "upload-url", value_name = "URL")]
    pub upload_url: Option<Url>,
    /// The secret key of the metadata storage service.
    #[arg(long = "storage-secret-key", value_name = "SECRET_KEY", env = "BATCH_MINT_STORAGE_KEY")]
    pub storage_secret_key: Option<String>,
    /// Number of confirmations to wait for after sending the batch.
    #[arg(long, value_name = "BLOCKS")]
    pub confirmations: Option<u64>,
    /// The gas limit of the batch transaction.
    #[arg(long = "gas-limit", value_name = "GAS")]
    pub gas_limit: Option<u64>,
    /// The value sent with the batch transaction, in wei.
    #[arg(long, value_name = "WEI")]
    pub value: Option<U256>,
    /// The nonce of the batch transaction.
    #[arg(long, value_name = "NONCE")]
    pub nonce: Option<u64>,
    /// Print the batch calldata instead of sending it.
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,
    /// Check that the contract supports the batched function before sending.
    #[arg(long = "check-support", default_value_t = false)]
    pub check_support: bool,
}

impl Args {
    /// Composes the batch and submits it, or prints it on a dry run.
    pub async fn run(self) -> eyre::Result<()> {
        let config = if !self.config.exists() {
            let config = self.merge_config(BatchConfig::default());
            config.save_to_file(&self.config)?;
            config
        } else {
            self.merge_config(BatchConfig::load_from_file(&self.config)?)
        };

        let items = read_items(&self.items)?;
        let builder = self.call_builder()?;

        if self.check_support {
            let provider =
                ProviderBuilder::new().connect_http(config.rpc.endpoint.clone()).erased();
            if !supports_batch(&provider, self.contract, self.selector()?).await? {
                eyre::bail!("contract {} does not support batched calls", self.contract);
            }
        }

        let uploader = IpfsUploader::from_config(&config.storage)?;
        let composer = BatchComposer::new(Arc::new(uploader));
        let request = composer
            .compose_with_overrides(
                self.contract,
                &items,
                builder.as_ref(),
                config.transaction.clone(),
            )
            .await?;

        if self.dry_run {
            info!(contract = %request.target, calls = request.len(), "Composed batch (dry run)");
            println!("to: {}", request.target);
            println!("data: {}", request.calldata());
            return Ok(());
        }

        if request.is_empty() {
            warn!("No items to mint");
            return Ok(());
        }

        let signer: PrivateKeySigner = self
            .private_key
            .as_deref()
            .ok_or_eyre("a private key is required to send the batch")?
            .parse()
            .wrap_err("invalid private key")?;
        info!(signer = %signer.address(), "Loaded transaction signer");

        let provider: DynProvider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc.endpoint.clone())
            .erased();

        let mut submitter = ProviderSubmitter::new(provider);
        if let Some(confirmations) = config.rpc.confirmations {
            submitter = submitter.with_confirmations(confirmations);
        }

        let submitted = submitter.submit(&request).await?;
        println!("{}", submitted.tx_hash);

        Ok(())
    }

    /// Merges [`Args`] values into an existing [`BatchConfig`] instance.
    pub fn merge_config(&self, config: BatchConfig) -> BatchConfig {
        config
            .with_endpoint(self.endpoint.clone())
            .with_confirmations(self.confirmations)
            .with_upload_url(self.upload_url.clone())
            .with_storage_secret_key(self.storage_secret_key.clone())
            .with_overrides(TxOverrides {
                gas_limit: self.gas_limit,
                value: self.value,
                nonce: self.nonce,
                ..Default::default()
            })
    }

    /// The call builder every item is encoded with.
    fn call_builder(&self) -> eyre::Result<Box<dyn CallBuilder>> {
        if let Some(signature) = &self.signature {
            return Ok(Box::new(SignatureCallBuilder::new(signature, self.args.clone())?));
        }
        let to = self.to.ok_or_eyre("missing recipient")?;
        Ok(Box::new(MintTo::new(to)))
    }

    /// Selector of the batched function.
    fn selector(&self) -> eyre::Result<Selector> {
        Ok(match &self.signature {
            Some(signature) => SignatureCallBuilder::new(signature, self.args.clone())?
                .function()
                .selector(),
            None => IMintableERC1155::mintToCall::SELECTOR.into(),
        })
    }
}

/// Reads a JSON list of [`BatchItem`]s.
fn read_items(path: &Path) -> eyre::Result<Vec<BatchItem>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read items file: {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("failed to parse items file: {}", path.display()))
}
