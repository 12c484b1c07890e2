use chessmatch::board::castle_rights::CastleRights;
use chessmatch::board::{Board, Color, Piece};
use chessmatch::searcher::{best_move, best_move_parallel};
use common::bitboard::*;

use criterion::{criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("alpha beta back rank position", |b| {
        b.iter(play_back_rank_position)
    });

    let kiwipete: Board = KIWIPETE.parse().unwrap();
    c.bench_function("alpha beta kiwipete depth 3", |b| {
        b.iter(|| best_move(&mut kiwipete.clone(), 3).unwrap())
    });
    c.bench_function("parallel alpha beta kiwipete depth 3", |b| {
        b.iter(|| best_move_parallel(&kiwipete, 3).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn play_back_rank_position() {
    let mut board = Board::new();

    board.put(F2, Piece::Pawn, Color::White).unwrap();
    board.put(G2, Piece::Pawn, Color::White).unwrap();
    board.put(H2, Piece::Pawn, Color::White).unwrap();
    board.put(G1, Piece::King, Color::White).unwrap();
    board.put(A1, Piece::Rook, Color::White).unwrap();
    board.put(E8, Piece::Rook, Color::Black).unwrap();
    board.put(E7, Piece::Queen, Color::Black).unwrap();
    board.put(H8, Piece::King, Color::Black).unwrap();
    board.set_turn(Color::Black);
    board.lose_castle_rights(CastleRights::all());

    for _ in 0..3 {
        match best_move(&mut board, 3) {
            Ok(chess_move) => board.apply(chess_move).unwrap(),
            Err(_) => break,
        }
    }
}
