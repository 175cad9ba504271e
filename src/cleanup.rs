use std::cell::RefCell;

use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

type Task = Box<dyn FnOnce()>;

/// An ordered, one-shot collection of teardown callbacks. Every resource a
/// view acquires while rendering (event listeners, child views, timers)
/// registers its release here, and the owning view drains the registry before
/// the next render and on destruction.
#[derive(Default)]
pub struct CleanupRegistry {
    tasks: RefCell<Vec<Task>>,
}

impl CleanupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
        }
    }

    /// Append a teardown task. Tasks run in the order they were added.
    pub fn add<F>(&self, task: F)
    where
        F: 'static + FnOnce(),
    {
        self.tasks.borrow_mut().push(Box::new(task));
    }

    /// Attach `listener` to `target` immediately, and register its removal as
    /// a teardown task. The backing [`Closure`] stays alive until the
    /// registry runs, at which point the listener is detached and dropped.
    pub fn on<F>(&self, target: &EventTarget, event_type: &str, listener: F)
    where
        F: 'static + FnMut(Event),
    {
        let closure = Closure::<dyn FnMut(Event)>::new(listener);

        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .expect("listener to attach");

        self.add({
            let target = target.clone();
            let event_type = event_type.to_string();

            move || {
                let _ = target.remove_event_listener_with_callback(
                    &event_type,
                    closure.as_ref().unchecked_ref(),
                );
            }
        });
    }

    /// Same as [`CleanupRegistry::on`], with explicit listener options (eg
    /// `passive` for scroll handlers).
    pub fn on_with_options<F>(
        &self,
        target: &EventTarget,
        event_type: &str,
        options: &AddEventListenerOptions,
        listener: F,
    ) where
        F: 'static + FnMut(Event),
    {
        let closure = Closure::<dyn FnMut(Event)>::new(listener);

        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                closure.as_ref().unchecked_ref(),
                options,
            )
            .expect("listener to attach");

        self.add({
            let target = target.clone();
            let event_type = event_type.to_string();

            move || {
                let _ = target.remove_event_listener_with_callback(
                    &event_type,
                    closure.as_ref().unchecked_ref(),
                );
            }
        });
    }

    /// Drain the registry and run every task in registration order. The list
    /// is cleared before the first task executes, so a task that triggers a
    /// re-entrant `run()` sees an empty registry, and tasks registered while
    /// draining survive for the next run.
    pub fn run(&self) {
        let tasks = self.tasks.replace(Vec::new());

        for task in tasks {
            task();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::CleanupRegistry;

    #[test]
    fn runs_tasks_in_registration_order() {
        let registry = CleanupRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let order = Rc::clone(&order);
            registry.add(move || order.borrow_mut().push(id));
        }

        registry.run();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn run_is_idempotent_until_new_tasks_arrive() {
        let registry = CleanupRegistry::new();
        let count = Rc::new(RefCell::new(0));

        registry.add({
            let count = Rc::clone(&count);
            move || *count.borrow_mut() += 1
        });

        registry.run();
        registry.run();
        assert_eq!(*count.borrow(), 1);

        registry.add({
            let count = Rc::clone(&count);
            move || *count.borrow_mut() += 1
        });

        registry.run();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn tasks_added_while_draining_run_on_the_next_drain() {
        let registry = Rc::new(CleanupRegistry::new());
        let count = Rc::new(RefCell::new(0));

        registry.add({
            let registry = Rc::clone(&registry);
            let count = Rc::clone(&count);
            move || {
                let count = Rc::clone(&count);
                registry.add(move || *count.borrow_mut() += 1);
            }
        });

        registry.run();
        assert_eq!(*count.borrow(), 0);

        registry.run();
        assert_eq!(*count.borrow(), 1);
    }
}
