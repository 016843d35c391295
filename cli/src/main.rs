//! Deterministic end-to-end scenario runner.
//!
//! Drives one full lottery cycle against the in-memory token ledgers: fund
//! players, place wagers, draw via the oracle flow, settle claims in batches,
//! and print the resulting status as JSON. Useful as a smoke test and as a
//! worked example of the engine API.

use lottery_core_rs::{
    DrawContext, DrawOutcome, EngineConfig, InMemoryToken, LotteryEngine, TokenLedger,
};

const ENGINE_ID: &str = "lottery-pool";
const ORACLE: &str = "oracle";
const OWNER: &str = "owner";
const PLAYERS: [&str; 2] = ["alice", "bob"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::default();

    let mut base = InMemoryToken::new();
    for player in PLAYERS {
        base.mint(player, 10_000_000)?;
        base.approve(player, ENGINE_ID, 10_000_000);
    }

    let mut engine = LotteryEngine::new(config, Box::new(base), Box::new(InMemoryToken::new()))?;

    println!("== placing wagers ==");
    let receipts = [
        engine.place_wager("alice", &[123, 321, 555], 2)?,
        engine.place_wager("alice", &[42], 10)?,
        engine.place_wager("bob", &[555, 213], 5)?,
    ];
    for receipt in &receipts {
        println!(
            "period {} bet #{}: cost {} reward {}",
            receipt.period, receipt.bet_index, receipt.cost, receipt.reward_minted
        );
    }

    println!("\n== drawing ==");
    let context = DrawContext {
        previous_block_id: [21u8; 32],
        timestamp: 1_700_000_000,
    };
    let request_id = match engine.request_draw(OWNER, &context)? {
        DrawOutcome::Pending { request_id } => request_id,
        DrawOutcome::Resolved(resolution) => {
            println!("resolved inline: outcome {}", resolution.outcome);
            print_settlement(&mut engine)?;
            return Ok(());
        }
    };
    println!("randomness request {}", request_id);

    // Play the oracle: deliver a word that lands on outcome 123.
    let resolution = engine.fulfill_randomness(ORACLE, &request_id, 1_000_123)?;
    println!(
        "period {} outcome {:03} (pool share {}, fee share {})",
        resolution.period, resolution.outcome, resolution.pool_share, resolution.fee_share
    );

    print_settlement(&mut engine)?;
    Ok(())
}

fn print_settlement(engine: &mut LotteryEngine) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n== claiming ==");
    for player in PLAYERS {
        loop {
            let receipt = engine.claim(player, 1, 2)?;
            println!(
                "{}: paid {} for bets [{}, {})",
                player, receipt.winnings_paid, receipt.processed_from, receipt.processed_through
            );
            if receipt.is_completed {
                break;
            }
        }
        let progress = engine.claim_progress(1, player);
        println!(
            "{}: {}/{} processed, reward balance {}",
            player,
            progress.processed,
            progress.total,
            engine.reward_token().balance_of(player)
        );
    }

    println!("\n== status ==");
    println!("{}", serde_json::to_string_pretty(&engine.status())?);
    Ok(())
}
