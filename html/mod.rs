//! Server-side markup for the todo list, built with [maud](https://maud.lambda.xyz/).
//! Nothing here mutates the list, it only renders the already sorted todos.

mod head;
pub use head::*;

use crate::*;

pub const STYLESHEET_PATH: &str = "/style.css";
/// Stylesheet served at [`STYLESHEET_PATH`]
pub const STYLESHEET: &str = include_str!("style.css");

const PAGE_TITLE: &str = "Todo list";
const DELETE_CONFIRM: &str = "return confirm('Delete this task?');";

/// Full page with the add form and every todo, `editing` switches one of them into an inline form
pub fn todo_page(todos: &[Todo], editing: Option<TodoId>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (Head::with_title(PAGE_TITLE))
            body {
                div.container {
                    h1 { "📝 " (PAGE_TITLE) }
                    (add_form())
                    ul.todo-list {
                        @for todo in todos {
                            (TodoItem { todo, editing: editing == Some(todo.id) })
                        }
                    }
                }
            }
        }
    }
}

fn add_form() -> Markup {
    html! {
        div.add-form {
            form action="/" method="post" {
                input type="hidden" name="action" value="add";
                input type="text" name="task" placeholder="New task..." required;
                div.colors {
                    @for color in Color::ALL {
                        label.color-option {
                            input type="radio" name="color" value=(color.name()) checked[color == Color::default()];
                            span.color-swatch style={ "background-color: " (color.hex()) ";" } {}
                        }
                    }
                }
                button type="submit" { "Add" }
            }
        }
    }
}

/// Single `<li>` of the list
pub struct TodoItem<'a> {
    pub todo: &'a Todo,
    pub editing: bool,
}

impl TodoItem<'_> {
    fn classes(&self) -> String {
        let mut classes = format!("todo-item color-{}", self.todo.color.name());
        if self.todo.completed {
            classes.push_str(" completed");
        }
        if self.todo.pinned {
            classes.push_str(" pinned");
        }
        classes
    }
}

impl Render for TodoItem<'_> {
    fn render(&self) -> Markup {
        let Todo {
            id,
            task,
            completed,
            pinned,
            ..
        } = self.todo;
        html! {
            li class=(self.classes()) {
                div.task-content {
                    @if self.editing {
                        form.edit-form action="/" method="post" {
                            input type="hidden" name="action" value="update";
                            input type="hidden" name="id" value=(id);
                            input type="text" name="task" value=(task) autofocus;
                            button type="submit" { "Save" }
                        }
                    } @else {
                        p.task-text { (task) }
                    }
                }
                div.actions {
                    (action_button("toggle_complete", *id, "Complete / reopen", None,
                        if *completed { "✅" } else { "✔️" }))
                    (action_button("toggle_pin", *id, "Pin / unpin",
                        Some(if *pinned { "pin-button pinned" } else { "pin-button" }), "📌"))
                    form action="/" method="get" {
                        input type="hidden" name="edit" value=(id);
                        button type="submit" title="Edit" { "✏️" }
                    }
                    form action="/" method="post" {
                        input type="hidden" name="action" value="delete";
                        input type="hidden" name="id" value=(id);
                        button type="submit" title="Delete" onclick=(DELETE_CONFIRM) { "🗑️" }
                    }
                }
            }
        }
    }
}

fn action_button(
    action: &str,
    id: TodoId,
    title: &str,
    class: Option<&str>,
    label: &str,
) -> Markup {
    html! {
        form action="/" method="post" {
            input type="hidden" name="action" value=(action);
            input type="hidden" name="id" value=(id);
            button type="submit" title=(title) class=[class] { (label) }
        }
    }
}
