//! Generate a board and let two random players fill it

use sphere_go::*;

fn main() -> Result<()> {
    println!("Generating board...");

    let config = BoardConfigBuilder::new()
        .board_size(BoardSize::Medium)
        .build()?;

    let mut game = GameController::new(config)?;
    let board = game.board();

    println!(
        "{} board: complexity {}, {} slots, {} connections, {} tiles",
        config.board_size.name(),
        config.complexity(),
        board.slot_count(),
        board.connections().len(),
        board.tiles().len()
    );

    #[cfg(feature = "spatial-index")]
    {
        let pos = Vec3::new(1.0, 0.2, 0.1).normalize();
        let slot = board.find_slot_at(pos);
        println!("Point {:?} is nearest slot {}", pos, slot);
        println!("Slot {} has neighbors {:?}", slot, board.neighbors(slot));
    }

    let mut selector = RandomSelector::new(42);
    let log = random_playout(&mut game, &mut selector, 400)?;

    let captures: usize = log.iter().map(|m| m.captured.len()).sum();
    println!("\nPlayed {} moves, {} stones captured", log.len(), captures);

    let state = game.state();
    for player in [Player::One, Player::Two] {
        let stones = state.occupancy(player).iter().filter(|&&o| o).count();
        println!(
            "  {:?}: {} stones on board, {} prisoners",
            player,
            stones,
            state.prisoners(player)
        );
    }
    println!("{:?} to move, {} valid moves left", state.to_move(), state.valid_moves().len());

    Ok(())
}
