//! Cardemo - a composable-token demonstration.
//!
//! This app drives a fixed narrative against an in-process ledger:
//! - deploy the five demo contracts (Car, Engine, Wheel, FuelTank, Fuel)
//! - mint car parts to a test account
//! - assemble the car (attach children via several transfer mechanisms)
//! - disassemble it, including a parent-to-parent transfer interlude
//! - reassemble and resell the finished car
//!
//! Usage:
//!   cardemo                      # Run the full narrative
//!   cardemo run --interactive    # Same, pausing between steps
//!   cardemo assemble             # Stop after assembly

use clap::{Parser, Subcommand};
use console::style;

use composable_driver::{
    attach_via_claim, attach_via_transfer, deploy_contracts, detach_to_account, detach_to_parent,
    fill_fuel_tank, fuel_level, mint_car, mint_car_parts, resell_car, root_owner_of,
    total_children, Address, CarAssembly, ContractKind, ContractRegistry, Ledger, TxOutcome,
};
use ledger_sim::SimLedger;

/// One fuel unit at 18 decimals, for liter display.
const FUEL_UNIT: u128 = 1_000_000_000_000_000_000;

#[derive(Parser)]
#[command(name = "cardemo")]
#[command(about = "Composable-token car demo")]
#[command(version)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full narrative: assemble, disassemble, reassemble, resell
    Run {
        /// Pause for confirmation between narrated steps
        #[arg(long)]
        interactive: bool,
    },

    /// Stop after the car is assembled
    Assemble {
        #[arg(long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let (interactive, full) = match cli.command {
        None => (false, true),
        Some(Commands::Run { interactive }) => (interactive, true),
        Some(Commands::Assemble { interactive }) => (interactive, false),
    };

    run_demo(interactive, full).await
}

async fn run_demo(interactive: bool, full: bool) -> anyhow::Result<()> {
    let ledger = SimLedger::new();
    let alice = ledger.create_account().await?;
    let bob = ledger.create_account().await?;

    let registry = deploy(&ledger).await?;
    pause(interactive)?;

    let parts = assemble(&ledger, &registry, alice, interactive).await?;

    if full {
        pause(interactive)?;
        disassemble(&ledger, &registry, alice, &parts, interactive).await?;
        pause(interactive)?;
        reassemble(&ledger, &registry, alice, &parts).await?;
        pause(interactive)?;
        resell(&ledger, &registry, alice, bob, &parts).await?;
    }

    println!();
    println!("{} Demo complete", style("✓").green().bold());
    Ok(())
}

// ============================================================================
// Stages
// ============================================================================

async fn deploy(ledger: &SimLedger) -> anyhow::Result<ContractRegistry> {
    println!("{}", style("=== DEPLOYING CONTRACTS ===").cyan().bold());

    let registry = deploy_contracts(ledger).await?;
    for kind in ContractKind::ALL {
        println!("  {} : {}", kind, registry.address_of(kind)?);
    }
    Ok(registry)
}

async fn assemble(
    ledger: &SimLedger,
    registry: &ContractRegistry,
    alice: Address,
    interactive: bool,
) -> anyhow::Result<CarAssembly> {
    println!();
    println!("{}", style("=== ASSEMBLING THE CAR ===").cyan().bold());

    let parts = mint_car_parts(ledger, registry, alice).await?;
    println!("  Minted car parts to {}", alice);
    println!("  Car ID: {}", parts.car);
    println!("  Engine ID: {}", parts.engine);
    println!(
        "  Wheel IDs: {}, {}, {}, {}",
        parts.wheels[0], parts.wheels[1], parts.wheels[2], parts.wheels[3]
    );
    println!("  Fuel Tank ID: {}", parts.fuel_tank);
    println!("  Fuel Balance: {}L", parts.fuel / FUEL_UNIT);
    pause(interactive)?;

    // Method 1: transfer-with-data
    println!();
    println!(
        "{}",
        style("--- Engine: transfer-with-data ---").yellow().bold()
    );
    println!("  Sending Engine #{} to Car #{}...", parts.engine, parts.car);
    let outcome = attach_via_transfer(
        ledger,
        registry,
        alice,
        ContractKind::Engine,
        parts.engine,
        ContractKind::Car,
        parts.car,
    )
    .await?;
    report(&outcome);
    pause(interactive)?;

    // Method 2: approve-then-claim
    println!();
    println!(
        "{}",
        style("--- Wheels: approve-then-claim ---").yellow().bold()
    );
    for wheel in parts.wheels {
        println!("  Adding Wheel #{} to Car #{}...", wheel, parts.car);
        let outcome = attach_via_claim(
            ledger,
            registry,
            alice,
            ContractKind::Wheel,
            wheel,
            ContractKind::Car,
            parts.car,
        )
        .await?;
        report(&outcome);
    }
    pause(interactive)?;

    // Composable into composable, again via transfer-with-data
    println!();
    println!(
        "{}",
        style("--- Fuel tank: composable into composable ---")
            .yellow()
            .bold()
    );
    println!(
        "  Adding FuelTank #{} to Car #{}...",
        parts.fuel_tank, parts.car
    );
    let outcome = attach_via_transfer(
        ledger,
        registry,
        alice,
        ContractKind::FuelTank,
        parts.fuel_tank,
        ContractKind::Car,
        parts.car,
    )
    .await?;
    report(&outcome);
    pause(interactive)?;

    // Fungible attach
    println!();
    println!("{}", style("--- Fuel: fungible attach ---").yellow().bold());
    println!(
        "  Filling FuelTank #{} with {}L...",
        parts.fuel_tank,
        parts.fuel / FUEL_UNIT
    );
    let outcome = fill_fuel_tank(ledger, registry, alice, parts.fuel_tank, parts.fuel).await?;
    report(&outcome);
    println!(
        "  Tank level: {}L",
        fuel_level(ledger, registry, parts.fuel_tank).await? / FUEL_UNIT
    );

    let children = total_children(ledger, registry, ContractKind::Car, parts.car).await?;
    println!();
    println!(
        "  {} Car #{} assembled with {} attached parts",
        style("✓").green().bold(),
        parts.car,
        children
    );

    Ok(parts)
}

async fn disassemble(
    ledger: &SimLedger,
    registry: &ContractRegistry,
    alice: Address,
    parts: &CarAssembly,
    interactive: bool,
) -> anyhow::Result<()> {
    println!();
    println!("{}", style("=== DISASSEMBLING THE CAR ===").cyan().bold());

    // Parent-to-parent interlude: a second car is minted purely to show a
    // child moving between parents without touching an external account.
    println!();
    println!(
        "{}",
        style("--- Wheel: parent-to-parent transfer ---").yellow().bold()
    );
    let spare_car = mint_car(ledger, registry, alice).await?;
    println!("  Minted spare Car #{}", spare_car);
    println!(
        "  Moving Wheel #{} from Car #{} to Car #{}...",
        parts.wheels[0], parts.car, spare_car
    );
    let outcome = detach_to_parent(
        ledger,
        registry,
        alice,
        ContractKind::Car,
        parts.car,
        ContractKind::Car,
        spare_car,
        ContractKind::Wheel,
        parts.wheels[0],
    )
    .await?;
    report(&outcome);
    println!(
        "  Returning Wheel #{} from Car #{} to {}...",
        parts.wheels[0], spare_car, alice
    );
    let outcome = detach_to_account(
        ledger,
        registry,
        alice,
        ContractKind::Car,
        spare_car,
        ContractKind::Wheel,
        parts.wheels[0],
        alice,
    )
    .await?;
    report(&outcome);
    pause(interactive)?;

    println!();
    println!(
        "{}",
        style("--- Remaining parts: detach to account ---").yellow().bold()
    );
    let mut detachments = vec![
        (ContractKind::FuelTank, parts.fuel_tank),
        (ContractKind::Engine, parts.engine),
    ];
    detachments.extend(parts.wheels[1..].iter().map(|w| (ContractKind::Wheel, *w)));
    for (kind, token) in detachments {
        println!("  Detaching {} #{} to {}...", kind, token, alice);
        let outcome = detach_to_account(
            ledger,
            registry,
            alice,
            ContractKind::Car,
            parts.car,
            kind,
            token,
            alice,
        )
        .await?;
        report(&outcome);
    }

    let children = total_children(ledger, registry, ContractKind::Car, parts.car).await?;
    println!();
    println!(
        "  {} Car #{} stripped down to {} attached parts",
        style("✓").green().bold(),
        parts.car,
        children
    );
    Ok(())
}

async fn reassemble(
    ledger: &SimLedger,
    registry: &ContractRegistry,
    alice: Address,
    parts: &CarAssembly,
) -> anyhow::Result<()> {
    println!();
    println!("{}", style("=== REASSEMBLING THE CAR ===").cyan().bold());

    attach_via_transfer(
        ledger,
        registry,
        alice,
        ContractKind::Engine,
        parts.engine,
        ContractKind::Car,
        parts.car,
    )
    .await?;
    for wheel in parts.wheels {
        attach_via_claim(
            ledger,
            registry,
            alice,
            ContractKind::Wheel,
            wheel,
            ContractKind::Car,
            parts.car,
        )
        .await?;
    }
    attach_via_transfer(
        ledger,
        registry,
        alice,
        ContractKind::FuelTank,
        parts.fuel_tank,
        ContractKind::Car,
        parts.car,
    )
    .await?;

    let children = total_children(ledger, registry, ContractKind::Car, parts.car).await?;
    println!(
        "  {} Car #{} reassembled with {} attached parts",
        style("✓").green().bold(),
        parts.car,
        children
    );
    Ok(())
}

async fn resell(
    ledger: &SimLedger,
    registry: &ContractRegistry,
    alice: Address,
    bob: Address,
    parts: &CarAssembly,
) -> anyhow::Result<()> {
    println!();
    println!("{}", style("=== RESELLING THE CAR ===").cyan().bold());
    println!("  Selling Car #{} to {}...", parts.car, bob);

    let outcome = resell_car(ledger, registry, alice, bob, parts.car).await?;
    report(&outcome);

    for (kind, token) in [
        (ContractKind::Car, parts.car),
        (ContractKind::Engine, parts.engine),
        (ContractKind::Wheel, parts.wheels[0]),
        (ContractKind::FuelTank, parts.fuel_tank),
    ] {
        let root = root_owner_of(ledger, registry, kind, token).await?;
        println!("  Root owner of {} #{}: {}", kind, token, root);
    }

    println!(
        "  {} The whole car, parts included, now belongs to {}",
        style("✓").green().bold(),
        bob
    );
    Ok(())
}

// ============================================================================
// Transcript helpers
// ============================================================================

fn report(outcome: &TxOutcome) {
    println!("  Transaction hash: {}", outcome.tx_hash);
    println!("  Gas used: {}", outcome.gas_used);
}

/// Gate progression on one line of operator input. A no-op unless the demo
/// runs interactively.
fn pause(interactive: bool) -> anyhow::Result<()> {
    if interactive {
        dialoguer::Confirm::new()
            .with_prompt("Continue?")
            .default(true)
            .interact()?;
    }
    Ok(())
}
