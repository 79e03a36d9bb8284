use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::Action;

impl Store {
    pub(in crate::kernel::store) fn reduce_context_menu_action(
        &mut self,
        action: Action,
    ) -> DispatchResult {
        match action {
            // Last write wins; a new menu silently replaces the open one.
            Action::SetContextMenu(menu) => {
                DispatchResult::changed(self.state.context_menu.set(menu))
            }
            _ => unreachable!("non-context-menu action passed to reduce_context_menu_action"),
        }
    }
}
