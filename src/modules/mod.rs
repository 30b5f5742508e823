pub mod books;
pub mod reservations;
pub mod users;

use libris_kernel::ModuleRegistry;

use crate::catalogue::Library;

/// Register every feature module against one shared library handle
pub fn register_all(registry: &mut ModuleRegistry, library: &Library) {
    registry.register(books::create_module(library.clone()));
    registry.register(users::create_module(library.clone()));
    registry.register(reservations::create_module(library.clone()));
}
