/// Router Module Index
///
/// Organizes the application's routing logic by function. The table module is
/// pure derivation logic with no axum surface of its own; the portal and api
/// modules each assemble one functional slice of the HTTP surface and are
/// merged into the final router in `create_router`.

/// Route derivation: turns discovered page identifiers into the ordered table.
pub mod table;

/// Serves the discovered day pages plus the home redirect.
pub mod portal;

/// Thin JSON proxy in front of the upstream user service.
pub mod api;
