use super::state::{GameState, LOSE_VALUE, NEUTRAL_VALUE, WIN_VALUE};

/// Full-depth search below `state`. The computer takes any immediate win;
/// every other node scores the mean over its legal moves, so the human is
/// modelled as picking columns uniformly at random.
pub fn compute_utility(state: &GameState) -> f64 {
    if state.remaining_depth == 0 {
        return NEUTRAL_VALUE;
    }

    let mut total: f64 = 0.0;
    let mut count: usize = 0;

    for child in state.successors() {
        if child.is_computer_win() {
            return WIN_VALUE;
        }

        total += if child.is_human_win() {
            LOSE_VALUE
        } else {
            compute_utility(&child)
        };
        count += 1;
    }

    if count == 0 {
        return NEUTRAL_VALUE;
    }

    return total / (count as f64);
}
