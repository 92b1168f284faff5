use minimax_chess::board::Board;
use minimax_chess::input_handler::parse_fen;
use minimax_chess::move_generator::MoveGenerator;

use criterion::{criterion_group, criterion_main, Criterion};

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    let move_generator = MoveGenerator::new();

    c.bench_function("perft starting position to depth 4", |b| {
        b.iter(|| move_generator.perft(4, &mut Board::starting_position()))
    });

    let kiwipete = parse_fen(KIWIPETE_FEN).unwrap();
    c.bench_function("perft kiwipete to depth 3", |b| {
        b.iter(|| move_generator.perft(3, &mut kiwipete.clone()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
