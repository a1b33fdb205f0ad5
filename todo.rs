use crate::*;
use std::cmp::Ordering;

/// Creation timestamp of a todo, doubles as its identifier
pub type TodoId = i64;

/// Background tint of a todo, persisted as its lowercase name
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Color {
    #[default]
    White,
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
    ];

    /// Unknown names fall back to [`Color::White`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "red" => Color::Red,
            "blue" => Color::Blue,
            "yellow" => Color::Yellow,
            "green" => Color::Green,
            _ => Color::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Color::White => "#FFFFFF",
            Color::Red => "#FFD1D1",
            Color::Blue => "#D1E3FF",
            Color::Yellow => "#FFFAD1",
            Color::Green => "#D1FFD7",
        }
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::from_name(&name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub task: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pinned: bool,
}

impl Todo {
    pub fn new(id: TodoId, task: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            task: task.into(),
            color,
            completed: false,
            pinned: false,
        }
    }
}

/// Pinned todos first, then newest first
pub fn canonical_order(a: &Todo, b: &Todo) -> Ordering {
    b.pinned.cmp(&a.pinned).then(b.id.cmp(&a.id))
}

pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by(canonical_order);
}

/// Picks an id from the current unix time, bumped past any id it would collide with
pub fn fresh_id(todos: &[Todo], now: TodoId) -> TodoId {
    let mut id = now;
    while todos.iter().any(|todo| todo.id == id) {
        id += 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn todo(id: TodoId, pinned: bool) -> Todo {
        Todo {
            pinned,
            ..Todo::new(id, format!("task {id}"), Color::White)
        }
    }

    #[test]
    fn pinned_first_then_newest() {
        let mut todos = vec![todo(1, false), todo(3, false), todo(2, true), todo(0, true)];
        sort_todos(&mut todos);
        let ids: Vec<_> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 0, 3, 1]);
    }

    #[test]
    fn unknown_colors_fall_back_to_white() {
        let parsed: Todo = serde_json::from_str(
            r#"{"id": 5, "task": "paint", "color": "purple", "completed": false, "pinned": false}"#,
        )
        .unwrap();
        assert_eq!(parsed.color, Color::White);
        assert_eq!(Color::from_name("green"), Color::Green);
        assert_eq!(serde_json::to_string(&Color::Yellow).unwrap(), r#""yellow""#);
    }

    #[test]
    fn fresh_ids_skip_taken_timestamps() {
        let todos = vec![todo(100, false), todo(101, true)];
        assert_eq!(fresh_id(&todos, 100), 102);
        assert_eq!(fresh_id(&todos, 250), 250);
        assert_eq!(fresh_id(&[], 7), 7);
    }

    proptest! {
        #[test]
        fn sorted_lists_respect_pin_and_id_order(
            items in proptest::collection::vec((any::<i64>(), any::<bool>()), 0..40)
        ) {
            let mut todos: Vec<Todo> = items.into_iter().map(|(id, pinned)| todo(id, pinned)).collect();
            sort_todos(&mut todos);
            for pair in todos.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.pinned >= b.pinned);
                if a.pinned == b.pinned {
                    prop_assert!(a.id >= b.id);
                }
            }
        }
    }
}
