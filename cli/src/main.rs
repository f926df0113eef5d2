use std::{env, process, thread, time::Duration};

use colored::Colorize;
use common::solver::{SolveResult, find_move_sequence};
use common::{Board, DEFAULT_NR_DISKS, MAX_NR_DISKS, Peg};

const STEP_DELAY_MS: u64 = 300;

fn main() {
    let mut args = env::args().skip(1);
    let nr_disks = match args.next() {
        None => DEFAULT_NR_DISKS,
        Some(s) => match s.parse::<u8>() {
            Ok(n) if (1..=MAX_NR_DISKS).contains(&n) => n,
            _ => {
                eprintln!("usage: cli [nr_disks]   (1..={MAX_NR_DISKS})");
                process::exit(2);
            }
        },
    };

    let mut board = Board::new(nr_disks);
    println!("{}", format!("tower of hanoi, {nr_disks} disks").bold());
    draw(&board);

    let moves = match find_move_sequence(&board) {
        SolveResult::Solved(moves) => moves,
        SolveResult::Unsolvable => {
            eprintln!("{}", "no solution found from this position".red());
            process::exit(1);
        }
    };
    println!("shortest solution: {} moves", moves.len());

    for mv in moves {
        thread::sleep(Duration::from_millis(STEP_DELAY_MS));
        if !board.attempt_move(mv.src, mv.dst) {
            eprintln!("{}", format!("move {mv} no longer applies, stopping").red());
            process::exit(1);
        }
        println!();
        println!("{} {mv}", format!("move {}:", board.move_count()).bold());
        draw(&board);
    }

    if board.is_solved() {
        println!(
            "{}",
            format!("solved in {} moves", board.move_count())
                .green()
                .bold()
        );
    }
}

/// Draw the three towers side by side, widest possible disk plus a margin
/// per column, colored like the web frontend's disks.
fn draw(board: &Board) {
    let n = board.nr_disks() as usize;
    let col_width = 2 * n + 3;

    for level in (0..n).rev() {
        for peg in Peg::all() {
            match board.disks_on(peg).get(level) {
                Some(disk) => {
                    let width = 2 * disk.0 as usize + 1;
                    let pad = (col_width - width) / 2;
                    let (r, g, b) = disk_color(disk.0);
                    print!(
                        "{}{}{}",
                        " ".repeat(pad),
                        "█".repeat(width).truecolor(r, g, b),
                        " ".repeat(col_width - pad - width),
                    );
                }
                None => {
                    let pad = (col_width - 1) / 2;
                    print!(
                        "{}{}{}",
                        " ".repeat(pad),
                        "│".dimmed(),
                        " ".repeat(col_width - pad - 1),
                    );
                }
            }
        }
        println!();
    }

    for peg in Peg::all() {
        let label = format!("peg {peg}");
        let pad = (col_width - label.len()) / 2;
        print!(
            "{}{}{}",
            " ".repeat(pad),
            label.dimmed(),
            " ".repeat(col_width - pad - label.len()),
        );
    }
    println!();
}

/// Same palette as the web frontend: hsl(size * 30, 70%, 50%).
fn disk_color(size: u8) -> (u8, u8, u8) {
    hsl_to_rgb(f32::from(size) * 30.0, 0.7, 0.5)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u16 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
