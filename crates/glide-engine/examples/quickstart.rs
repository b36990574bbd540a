//! Glide Quickstart: a small crowd of animated values from scratch.
//!
//! Demonstrates:
//!   1. Building curves from Hermite segment descriptions
//!   2. Configuring an evaluator (strategy from `GLIDE_BULK_STRATEGY`)
//!   3. Assigning curves with clamped and modular output ranges
//!   4. Advancing frames and reading positions, values and metrics
//!   5. Compacting slots with clear + relocate + resize
//!
//! Run with:
//!   cargo run --example quickstart
//!   GLIDE_BULK_STRATEGY=verify cargo run --example quickstart

use glide_core::{CubicInit, Interval, SlotIndex};
use glide_curve::PiecewiseCubic;
use glide_engine::{BulkSplineEvaluator, EvaluatorConfig};

// ─── Timing ─────────────────────────────────────────────────────

const FRAMES: u32 = 90;
const DT: f32 = 1.0 / 30.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Glide Quickstart ===\n");

    // ─── Curves ─────────────────────────────────────────────────

    // Ease in, hold, ease out: a one-shot fade.
    let fade = PiecewiseCubic::builder(0.0)
        .hermite(CubicInit {
            start_y: 0.0,
            start_derivative: 0.0,
            end_y: 1.0,
            end_derivative: 0.0,
            width_x: 1.0,
        })
        .flat(1.0, 0.5)
        .linear(1.0, 0.0, 1.0)
        .build()?;

    // A heading that spins one and a half turns per second, looping.
    let heading = PiecewiseCubic::builder(0.0)
        .linear(0.0, 270.0, 0.5)
        .linear(270.0, 540.0, 0.5)
        .build()?;

    // A bobbing offset, looping.
    let bob = PiecewiseCubic::builder(0.0)
        .hermite(CubicInit {
            start_y: -1.0,
            start_derivative: 0.0,
            end_y: 1.0,
            end_derivative: 0.0,
            width_x: 0.75,
        })
        .hermite(CubicInit {
            start_y: 1.0,
            start_derivative: 0.0,
            end_y: -1.0,
            end_derivative: 0.0,
            width_x: 0.75,
        })
        .build()?;

    // ─── Evaluator ──────────────────────────────────────────────

    let config = EvaluatorConfig::from_env()?.with_initial_slots(3);
    let mut evaluator = BulkSplineEvaluator::new(config)?;
    println!("Strategy: {}", evaluator.strategy());

    let (fade_slot, heading_slot, bob_slot) = (SlotIndex(0), SlotIndex(1), SlotIndex(2));
    evaluator.set_range(fade_slot, Interval::new(0.0, 1.0), false);
    evaluator.set_range(heading_slot, Interval::new(0.0, 360.0), true);

    evaluator.assign_curve(fade_slot, &fade, 0.0, false);
    evaluator.assign_curve(heading_slot, &heading, 0.0, true);
    evaluator.assign_curve(bob_slot, &bob, 0.25, true);

    // ─── Frames ─────────────────────────────────────────────────

    println!("\n frame |   fade | heading |    bob");
    for frame in 1..=FRAMES {
        let metrics = evaluator.advance_frame(DT);
        if frame % 10 == 0 {
            println!(
                " {:>5} | {:>6.3} | {:>7.2} | {:>6.3}   (expired {}, {} us)",
                frame,
                evaluator.current_value(fade_slot),
                evaluator.current_value(heading_slot),
                evaluator.current_value(bob_slot),
                metrics.expired,
                metrics.total_us
            );
        }
    }
    println!(
        "\nFade position {:.3} (curve ends at {:.3})",
        evaluator.current_position(fade_slot),
        fade.end_position()
    );

    // ─── Compaction ─────────────────────────────────────────────

    // The fade is done: drop it and move the last slot into its place.
    evaluator.clear_curve(fade_slot);
    evaluator.relocate(bob_slot, fade_slot);
    evaluator.resize(2);
    evaluator.advance_frame(DT);
    println!(
        "After compaction: {} slots, values {:?}",
        evaluator.num_slots(),
        evaluator.values()
    );

    Ok(())
}
