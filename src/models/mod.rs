pub mod todo;

pub use todo::{NewSubTodoRequest, NewTodoRequest, SubTodo, SubTodoPatch, Todo, TodoPatch};
