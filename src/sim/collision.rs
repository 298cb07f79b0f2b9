//! Ball stepping and collision response on the LED grid
//!
//! The ball moves one cell diagonally per step. A step resolves, in order:
//! loss past the paddle column, the paddle's two edges, the top and bottom
//! walls, then the handoff back across the serve edge.

use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::state::{Ball, Speed};
use crate::consts::*;
use crate::link::Trajectory;

/// What a single grid step did to the rally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Ball is still on our grid
    Moved,
    /// Ball went past the paddle
    Lost,
    /// Ball left across the serve edge with this trajectory
    Handoff(Trajectory),
}

/// Count one scheduler tick; true when the ball is due a grid step.
pub fn step_due(ball: &mut Ball, speed: &Speed) -> bool {
    ball.tick_counter += 1;
    if ball.tick_counter < speed.tick_limit {
        return false;
    }
    ball.tick_counter = 0;
    true
}

/// Advance the ball one cell and resolve collisions.
pub fn advance(ball: &mut Ball, paddle: &Paddle) -> StepOutcome {
    ball.pos += ball.vel;

    if ball.pos.x == LOSS_COLUMN {
        return StepOutcome::Lost;
    }

    if ball.pos.x == PADDLE_COLUMN {
        let previous_row = ball.pos.y - ball.vel.y;
        if previous_row == paddle.centre() {
            // Upward ball would tunnel through the upper cell
            if ball.vel.y == -1 {
                ball.vel.y = 1;
                ball.pos.y += 2;
            }
            bounce_off_paddle(ball);
        } else if previous_row == paddle.centre() - 1 {
            if ball.vel.y == 1 {
                ball.vel.y = -1;
                ball.pos.y -= 2;
            }
            bounce_off_paddle(ball);
        }
    }

    if ball.pos.y > BOTTOM_ROW || ball.pos.y < TOP_ROW {
        ball.pos.y -= ball.vel.y * 2;
        ball.vel.y = -ball.vel.y;
    }

    if ball.pos.x < SERVE_COLUMN && ball.vel.x == -1 {
        return StepOutcome::Handoff(ball.trajectory());
    }

    StepOutcome::Moved
}

/// Undo the step into the paddle column and head back towards the serve edge.
fn bounce_off_paddle(ball: &mut Ball) {
    ball.pos.x -= ball.vel.x * 2;
    ball.vel.x = -ball.vel.x;
}
