//! Example: Query a wallet's balances on Ethereum and Solana.
//!
//! Run with: MORALIS_API_KEY=... cargo run --example wallet

use moralis_web3_api::evm::resolvers::balance::GetNativeBalanceParams;
use moralis_web3_api::evm::resolvers::token::{GetTokenPriceParams, GetWalletTokenBalancesParams};
use moralis_web3_api::sol::resolvers::SolAddressParams;
use moralis_web3_api::{Config, Core, EvmApi, Result, SolApi};

const EVM_WALLET: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
const SOL_WALLET: &str = "BWeBmN8zYDXgx2tnGj72cA533GZEWAVeqR9Eu29txaPT";
const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("MORALIS_API_KEY").unwrap_or_default();
    let core = Core::new(Config::default().default_header("x-api-key", api_key))?;
    let evm = EvmApi::create(&core);
    let sol = SolApi::create(&core);

    println!("=== Moralis Web3 API ===\n");

    // 1. Native balance
    println!("1. Fetching ETH balance...");
    let balance = evm
        .balance()
        .get_native_balance(GetNativeBalanceParams::new(EVM_WALLET))
        .await?;
    println!("   Balance: {} ETH", balance.result().balance.to_ether_string());
    println!();

    // 2. ERC-20 balances
    println!("2. Fetching ERC-20 balances...");
    let tokens = evm
        .token()
        .get_wallet_token_balances(GetWalletTokenBalancesParams::new(EVM_WALLET))
        .await?;
    println!("   Tokens held: {}", tokens.result().len());
    for token in tokens.result().iter().take(5) {
        println!("   {} {}", token.amount(), token.symbol);
    }
    println!();

    // 3. Token price
    println!("3. Fetching WETH price...");
    let price = evm
        .token()
        .get_token_price(GetTokenPriceParams::new(WETH))
        .await?;
    println!("   USD price: {}", price.result().usd_price);
    println!();

    // 4. Solana portfolio
    println!("4. Fetching Solana portfolio...");
    let portfolio = sol
        .account()
        .get_portfolio(SolAddressParams::new(SOL_WALLET))
        .await?;
    let portfolio = portfolio.result();
    println!("   Balance: {} SOL", portfolio.native_balance.to_sol_string());
    println!("   NFTs: {}", portfolio.nfts.len());
    println!("   SPL tokens: {}", portfolio.tokens.len());

    println!("\n=== Done! ===");
    Ok(())
}
