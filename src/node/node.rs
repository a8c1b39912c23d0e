use super::state::{GameState, NEUTRAL_VALUE};
use super::utility::compute_utility;
use crate::process::task::Task;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub state: GameState,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(state: GameState) -> TreeNode {
        return Self {
            state,
            children: vec![],
        };
    }

    pub fn add_child(self: &mut Self, node: TreeNode) {
        self.children.push(node)
    }

    /// Unexpanded, unresolved and still playable: a unit of outstanding work.
    pub fn is_open(self: &Self) -> bool {
        return self.children.is_empty()
            && self.state.utility == NEUTRAL_VALUE
            && !self.state.board.is_full();
    }

    /// Expands the tree until nodes sit `scheduling_depth` plies below a root
    /// searched to `max_depth`. A computer win replaces all siblings and
    /// resolves the parent; a human win is kept as an unexpanded leaf.
    pub fn build_scheduling_tree(self: &mut Self, scheduling_depth: u8, max_depth: u8) {
        if max_depth.saturating_sub(self.state.remaining_depth) >= scheduling_depth {
            return;
        }

        let successors: Vec<GameState> = self.state.successors().collect();

        for state in successors {
            let mut child = TreeNode::new(state);

            if child.state.is_computer_win() {
                self.state.utility = child.state.utility;
                self.children.clear();
                self.add_child(child);
                return;
            }

            if !child.state.is_human_win() {
                child.build_scheduling_tree(scheduling_depth, max_depth);
            }

            self.add_child(child);
        }
    }

    /// Open leaves in depth-first, left-to-right order, each tagged with its
    /// child-index path from this node.
    pub fn collect_tasks(self: &Self) -> Vec<Task> {
        let mut tasks: Vec<Task> = vec![];
        let mut path: Vec<usize> = vec![];

        self.collect_into(&mut path, &mut tasks);

        return tasks;
    }

    fn collect_into(self: &Self, path: &mut Vec<usize>, tasks: &mut Vec<Task>) {
        if self.is_open() {
            tasks.push(Task::new(path.clone(), self.state.clone()));
            return;
        }

        if self.state.is_terminal() {
            return;
        }

        for (i, child) in self.children.iter().enumerate() {
            path.push(i);
            child.collect_into(path, tasks);
            path.pop();
        }
    }

    pub fn node_at(self: &Self, path: &[usize]) -> Option<&TreeNode> {
        let mut node = self;
        for index in path {
            node = node.children.get(*index)?;
        }

        return Some(node);
    }

    pub fn node_at_mut(self: &mut Self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut node = self;
        for index in path {
            node = node.children.get_mut(*index)?;
        }

        return Some(node);
    }

    /// Resolves this node locally with a full-depth search.
    pub fn evaluate(self: &mut Self) -> f64 {
        self.state.utility = compute_utility(&self.state);

        return self.state.utility;
    }

    /// Folds leaf utilities up the tree. Terminal nodes keep their value,
    /// every other internal node becomes the mean of its children.
    pub fn merge_utilities(self: &mut Self) -> f64 {
        if self.children.is_empty() || self.state.is_terminal() {
            return self.state.utility;
        }

        let total: f64 = self
            .children
            .iter_mut()
            .map(|child| child.merge_utilities())
            .sum();

        self.state.utility = total / (self.children.len() as f64);

        return self.state.utility;
    }

    /// Child with the highest utility; the lowest column wins ties.
    pub fn best_child(self: &Self) -> Option<&TreeNode> {
        let mut best: Option<&TreeNode> = None;

        for child in self.children.iter() {
            match best {
                Some(current) if child.state.utility <= current.state.utility => {}
                _ => best = Some(child),
            }
        }

        return best;
    }

    pub fn frontier_len(self: &Self) -> usize {
        if self.children.is_empty() {
            return 1;
        }

        return self.children.iter().map(|child| child.frontier_len()).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{board::Board, token::Player};
    use crate::node::state::{LOSE_VALUE, WIN_VALUE};
    use assert_approx_eq::assert_approx_eq;

    fn root(board: Board, max_depth: u8) -> TreeNode {
        TreeNode::new(GameState::root(board, max_depth))
    }

    fn depth_of(node: &TreeNode, max_depth: u8) -> u8 {
        max_depth - node.state.remaining_depth
    }

    fn boundary_nodes<'a>(node: &'a TreeNode, max_depth: u8, depth: u8, out: &mut Vec<&'a TreeNode>) {
        if depth_of(node, max_depth) == depth {
            out.push(node);
            return;
        }
        for child in node.children.iter() {
            boundary_nodes(child, max_depth, depth, out);
        }
    }

    #[test]
    fn test_scheduling_tree_stops_at_boundary() {
        let mut tree = root(Board::new(4, 4), 5);
        tree.build_scheduling_tree(2, 5);

        assert_eq!(tree.children.len(), 4);
        for child in tree.children.iter() {
            assert_eq!(child.children.len(), 4);
            for grandchild in child.children.iter() {
                assert!(grandchild.children.is_empty());
                assert_eq!(grandchild.state.remaining_depth, 3);
            }
        }
        assert_eq!(tree.frontier_len(), 16);
    }

    #[test]
    fn test_children_ordered_by_column_with_alternating_players() {
        let mut tree = root(Board::new(3, 3), 4);
        tree.build_scheduling_tree(2, 4);

        let columns: Vec<u8> = tree.children.iter().map(|c| c.state.last_move_column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
        assert!(tree
            .children
            .iter()
            .all(|c| c.state.last_move_player == Player::Computer));
        assert!(tree.children[0]
            .children
            .iter()
            .all(|c| c.state.last_move_player == Player::Human));
    }

    #[test]
    fn test_computer_win_prunes_siblings() {
        let mut board = Board::new(5, 4);
        for column in 1..4 {
            board.place(column, Player::Computer).unwrap();
        }
        let mut tree = root(board, 4);
        tree.build_scheduling_tree(2, 4);

        assert_eq!(tree.state.utility, WIN_VALUE);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].state.last_move_column, 0);
        assert_eq!(tree.children[0].state.utility, WIN_VALUE);
        assert!(tree.children[0].children.is_empty());
        assert!(tree.collect_tasks().is_empty());
    }

    #[test]
    fn test_human_win_is_unexpanded_leaf() {
        let mut board = Board::new(4, 4);
        for _ in 0..3 {
            board.place(3, Player::Human).unwrap();
        }
        let mut tree = root(board, 4);
        tree.build_scheduling_tree(3, 4);

        for child in tree.children.iter() {
            let last = child.children.last().unwrap();
            if child.state.last_move_column == 3 {
                assert!(!last.state.is_terminal());
                continue;
            }
            assert_eq!(last.state.last_move_column, 3);
            assert_eq!(last.state.utility, LOSE_VALUE);
            assert!(last.children.is_empty());
        }
    }

    #[test]
    fn test_collect_tasks_covers_boundary() {
        let mut board = Board::new(4, 4);
        for _ in 0..3 {
            board.place(3, Player::Human).unwrap();
        }
        let mut tree = root(board, 5);
        tree.build_scheduling_tree(2, 5);

        let tasks = tree.collect_tasks();
        let mut boundary: Vec<&TreeNode> = vec![];
        boundary_nodes(&tree, 5, 2, &mut boundary);
        let expected: Vec<&TreeNode> = boundary
            .into_iter()
            .filter(|node| node.state.utility == NEUTRAL_VALUE)
            .collect();

        assert_eq!(tasks.len(), expected.len());
        for (task, node) in tasks.iter().zip(expected.iter()) {
            assert_eq!(&task.state, &node.state);
            assert_eq!(&tree.node_at(&task.path).unwrap().state, &node.state);
        }

        let mut paths: Vec<&Vec<usize>> = tasks.iter().map(|t| &t.path).collect();
        paths.dedup();
        assert_eq!(paths.len(), tasks.len());
    }

    #[test]
    fn test_full_board_yields_no_tasks() {
        let mut board = Board::new(2, 2);
        board.place(0, Player::Human).unwrap();
        board.place(0, Player::Computer).unwrap();
        board.place(1, Player::Computer).unwrap();
        board.place(1, Player::Human).unwrap();

        let mut tree = root(board, 3);
        tree.build_scheduling_tree(1, 3);

        assert!(tree.children.is_empty());
        assert!(tree.collect_tasks().is_empty());
        assert_eq!(tree.evaluate(), NEUTRAL_VALUE);
    }

    #[test]
    fn test_merge_averages_children() {
        let mut tree = root(Board::new(4, 4), 4);
        tree.build_scheduling_tree(1, 4);

        let values = [0.5, -0.25, 0.0, 1.0 / 3.0];
        for (child, value) in tree.children.iter_mut().zip(values.iter()) {
            child.state.utility = *value;
        }

        let merged = tree.merge_utilities();
        assert_approx_eq!(merged, values.iter().sum::<f64>() / 4.0);
        assert_eq!(tree.best_child().unwrap().state.last_move_column, 0);
    }

    #[test]
    fn test_merge_keeps_terminal_nodes() {
        let mut board = Board::new(5, 4);
        for column in 1..4 {
            board.place(column, Player::Computer).unwrap();
        }
        let mut tree = root(board, 4);
        tree.build_scheduling_tree(2, 4);

        assert_eq!(tree.merge_utilities(), WIN_VALUE);
    }

    #[test]
    fn test_best_child_prefers_lowest_column_on_tie() {
        let mut tree = root(Board::new(3, 3), 3);
        tree.build_scheduling_tree(1, 3);
        tree.children[1].state.utility = 0.5;
        tree.children[2].state.utility = 0.5;

        assert_eq!(tree.best_child().unwrap().state.last_move_column, 1);
    }

    #[test]
    fn test_node_at_mut_writes_through_path() {
        let mut tree = root(Board::new(3, 3), 4);
        tree.build_scheduling_tree(2, 4);

        tree.node_at_mut(&[2, 1]).unwrap().state.utility = -0.5;
        assert_eq!(tree.children[2].children[1].state.utility, -0.5);
        assert!(tree.node_at(&[3]).is_none());
    }
}
