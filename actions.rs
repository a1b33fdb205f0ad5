use crate::*;

/// Raw fields of the mutation form, anything missing or malformed turns into a no-op
#[derive(Debug, Default, Clone)]
pub struct ActionForm {
    pub action: Option<String>,
    pub task: Option<String>,
    pub id: Option<String>,
    pub color: Option<String>,
}

/// Repeated fields don't fail the form, the last value wins
impl FromIterator<(String, String)> for ActionForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            let field = match key.as_str() {
                "action" => &mut form.action,
                "task" => &mut form.task,
                "id" => &mut form.id,
                "color" => &mut form.color,
                _ => continue,
            };
            *field = Some(value);
        }
        form
    }
}

/// A single mutation of the todo list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add { task: String, color: Color },
    Delete { id: TodoId },
    Update { id: TodoId, task: String },
    ToggleComplete { id: TodoId },
    TogglePin { id: TodoId },
    Noop,
}

impl From<ActionForm> for Action {
    fn from(form: ActionForm) -> Self {
        let ActionForm {
            action,
            task,
            id,
            color,
        } = form;
        let id = id.and_then(|id| id.trim().parse::<TodoId>().ok());
        let Some(action) = action else {
            return Action::Noop;
        };

        match (action.as_str(), id) {
            ("add", _) => match task {
                Some(task) if !task.is_empty() => Action::Add {
                    task,
                    color: color.as_deref().map(Color::from_name).unwrap_or_default(),
                },
                _ => Action::Noop,
            },
            ("delete", Some(id)) => Action::Delete { id },
            ("update", Some(id)) => match task {
                Some(task) => Action::Update { id, task },
                None => Action::Noop,
            },
            ("toggle_complete", Some(id)) => Action::ToggleComplete { id },
            ("toggle_pin", Some(id)) => Action::TogglePin { id },
            _ => Action::Noop,
        }
    }
}

impl Action {
    /// Applies the mutation in place, returns whether anything changed
    pub fn apply(self, todos: &mut Vec<Todo>, now: TodoId) -> bool {
        match self {
            Action::Add { task, color } => {
                let id = fresh_id(todos, now);
                todos.push(Todo::new(id, task, color));
                true
            }
            Action::Delete { id } => {
                let before = todos.len();
                todos.retain(|todo| todo.id != id);
                todos.len() != before
            }
            Action::Update { id, task } => find(todos, id).map(|todo| todo.task = task).is_some(),
            Action::ToggleComplete { id } => find(todos, id)
                .map(|todo| todo.completed = !todo.completed)
                .is_some(),
            Action::TogglePin { id } => find(todos, id)
                .map(|todo| todo.pinned = !todo.pinned)
                .is_some(),
            Action::Noop => false,
        }
    }
}

fn find(todos: &mut [Todo], id: TodoId) -> Option<&mut Todo> {
    todos.iter_mut().find(|todo| todo.id == id)
}

/// Loads the list, applies the action and persists the result, even when nothing changed
pub async fn handle_action(store: &TodoStore, action: Action) -> Result {
    let mut todos = store.load().await?;
    let label = format!("{action:?}");
    let changed = action.apply(&mut todos, chrono::Utc::now().timestamp());
    if changed {
        info!(target: "todos", "applied {label}");
    } else {
        debug!(target: "todos", "nothing to apply for {label}");
    }
    store.save(&mut todos).await
}
