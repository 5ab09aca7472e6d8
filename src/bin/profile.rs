//! Plays seeded random games so `--features hotpath` can report where the
//! engine spends its time.
//!
//! Usage: `profile [games] [side_length]`

use attt::config::GameConfig;
use attt::game::Game;
use attt::position::Position;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn empty_cells<const D: usize>(game: &Game<D>) -> Vec<Position<D>> {
    game.board()
        .positions()
        .filter(|pos| game.mark_at(pos).is_none())
        .collect()
}

#[hotpath::measure]
fn random_playout<const D: usize>(config: GameConfig, rng: &mut StdRng) -> usize {
    let mut game = Game::<D>::new(config);
    while game.is_active() {
        let cells = empty_cells(&game);
        let Some(&pos) = cells.choose(rng) else {
            break;
        };
        if game.play(pos).is_err() {
            break;
        }
    }
    game.move_count()
}

#[hotpath::main]
fn main() {
    let mut args = std::env::args().skip(1);
    let games: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(200);
    let side_length: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(9);

    let mut rng = StdRng::seed_from_u64(42);
    let config_2d = GameConfig::new(side_length).with_winning_length(5);
    let config_3d = GameConfig::new(side_length.min(5)).with_players(3);

    let mut moves_2d = 0;
    let mut moves_3d = 0;
    for _ in 0..games {
        moves_2d += random_playout::<2>(config_2d, &mut rng);
        moves_3d += random_playout::<3>(config_3d, &mut rng);
    }

    println!(
        "{} games: {} moves on {}x{} boards, {} moves on {}^3 boards",
        games,
        moves_2d,
        config_2d.clamped().side_length,
        config_2d.clamped().side_length,
        moves_3d,
        config_3d.clamped().side_length
    );
}
