//! Command operations over the architecture store
//!
//! One function per mutating verb. Each operation parses and validates its
//! arguments completely before the first field assignment, so a failure
//! never leaves the store partially mutated.

use tracing::{debug, info, span, Level};

use crate::core::{
    parse_port_ref, ArchitectureStore, MoveDirection, PortDirection, PortMoveError, StoreError,
};

/// What `add_link` actually recorded, for user-facing reporting
///
/// All fields carry the post-defaulting values: the source type falls back
/// to `"unknown"`, and the destination port and type inherit from the source
/// when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    pub src_module: String,
    pub src_port: String,
    pub src_type: String,
    pub dest_module: String,
    pub dest_port: String,
    pub dest_type: String,
    /// True when the destination port name was inherited from the source
    pub inherited_port: bool,
}

/// What `edit_port` recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSummary {
    pub module: String,
    pub port: String,
    pub ty: String,
    pub dir: PortDirection,
}

/// Establish a link between two ports, creating endpoints as needed
///
/// The source token must name a port. A missing source type defaults to
/// `"unknown"`; a missing destination port inherits the source port name
/// (flagged in the summary); a missing destination type inherits the source
/// type. On success the source port becomes `Out` with the destination
/// recorded, and the destination port becomes `In` with any stale
/// destination data forcibly cleared.
pub fn add_link(
    store: &mut ArchitectureStore,
    src: &str,
    dst: &str,
) -> Result<LinkSummary, StoreError> {
    let op_span = span!(Level::INFO, "add_link", src, dst);
    let _enter = op_span.enter();

    let src_ref = parse_port_ref(src)?;
    let dst_ref = parse_port_ref(dst)?;

    if !src_ref.has_port() {
        return Err(StoreError::missing_port(src));
    }

    let src_type = if src_ref.ty.is_empty() {
        "unknown".to_string()
    } else {
        src_ref.ty.clone()
    };

    let inherited_port = !dst_ref.has_port();
    let dest_port_name = if inherited_port {
        src_ref.port.clone()
    } else {
        dst_ref.port.clone()
    };
    let dest_type = if dst_ref.ty.is_empty() {
        src_type.clone()
    } else {
        dst_ref.ty.clone()
    };

    let source = store.ensure_module(&src_ref.module).ensure_port(&src_ref.port);
    source.ty = src_type.clone();
    source.set_link(&dst_ref.module, &dest_port_name);

    let dest = store.ensure_module(&dst_ref.module).ensure_port(&dest_port_name);
    dest.ty = dest_type.clone();
    dest.dir = PortDirection::In;
    // An In port never carries a destination, even a stale one
    dest.clear_destination();

    info!(
        src_module = %src_ref.module,
        src_port = %src_ref.port,
        dest_module = %dst_ref.module,
        dest_port = %dest_port_name,
        "Linked ports"
    );

    Ok(LinkSummary {
        src_module: src_ref.module,
        src_port: src_ref.port,
        src_type,
        dest_module: dst_ref.module,
        dest_port: dest_port_name,
        dest_type,
        inherited_port,
    })
}

/// Remove a link, identified by both of its endpoints
///
/// The source module and port must already exist, and the recorded
/// destination must exactly equal the given destination; only then are the
/// direction and destination cleared on the source port. The port itself is
/// never deleted.
pub fn remove_link(
    store: &mut ArchitectureStore,
    src: &str,
    dst: &str,
) -> Result<(), StoreError> {
    let op_span = span!(Level::INFO, "remove_link", src, dst);
    let _enter = op_span.enter();

    let src_ref = parse_port_ref(src)?;
    let dst_ref = parse_port_ref(dst)?;

    let module = store
        .module_mut(&src_ref.module)
        .ok_or_else(|| StoreError::module_not_found(&src_ref.module))?;
    let port = module
        .port_mut(&src_ref.port)
        .ok_or_else(|| StoreError::port_not_found(&src_ref.module, &src_ref.port))?;

    if !port.links_to(&dst_ref.module, &dst_ref.port) {
        return Err(StoreError::LinkNotFound {
            src_module: src_ref.module,
            src_port: src_ref.port,
            dest_module: dst_ref.module,
            dest_port: dst_ref.port,
        });
    }

    port.clear_link();
    info!(module = %src_ref.module, port = %src_ref.port, "Link removed");
    Ok(())
}

/// Edit a port's type and direction
///
/// The target module and port must exist. The type is set unconditionally.
/// The direction is taken from the token (unrecognized tokens mean `None`);
/// when the new direction is `In` or `None` the destination is cleared
/// unconditionally. Edit never writes a destination: relinking an `Out`
/// port goes through [`add_link`].
pub fn edit_port(
    store: &mut ArchitectureStore,
    target: &str,
    new_type: &str,
    dir_token: &str,
) -> Result<EditSummary, StoreError> {
    let op_span = span!(Level::INFO, "edit_port", target, new_type, dir_token);
    let _enter = op_span.enter();

    let target_ref = parse_port_ref(target)?;
    if !target_ref.has_port() {
        return Err(StoreError::missing_port(target));
    }

    let module = store
        .module_mut(&target_ref.module)
        .ok_or_else(|| StoreError::module_not_found(&target_ref.module))?;
    let port = module
        .port_mut(&target_ref.port)
        .ok_or_else(|| StoreError::port_not_found(&target_ref.module, &target_ref.port))?;

    port.ty = crate::core::clamp_name(new_type).to_string();
    let dir = PortDirection::from_token(dir_token);
    if dir != PortDirection::Out {
        port.clear_destination();
    }
    port.dir = dir;

    debug!(module = %target_ref.module, port = %target_ref.port, ?dir, "Port edited");

    Ok(EditSummary {
        module: target_ref.module,
        port: target_ref.port,
        ty: port.ty.clone(),
        dir,
    })
}

/// Move a port one position up or down within its module
///
/// The target module and port must exist, and the port must not already be
/// at the corresponding end of the sequence.
pub fn move_port(
    store: &mut ArchitectureStore,
    target: &str,
    direction: MoveDirection,
) -> Result<(), StoreError> {
    let op_span = span!(Level::INFO, "move_port", target, %direction);
    let _enter = op_span.enter();

    let target_ref = parse_port_ref(target)?;
    if !target_ref.has_port() {
        return Err(StoreError::missing_port(target));
    }

    let module = store
        .module_mut(&target_ref.module)
        .ok_or_else(|| StoreError::module_not_found(&target_ref.module))?;

    match module.move_port(&target_ref.port, direction) {
        Ok(()) => {
            debug!(module = %target_ref.module, port = %target_ref.port, %direction, "Port moved");
            Ok(())
        }
        Err(PortMoveError::NotFound) => Err(StoreError::port_not_found(
            &target_ref.module,
            &target_ref.port,
        )),
        Err(PortMoveError::AtBoundary) => {
            let (boundary, dir_word) = match direction {
                MoveDirection::Up => ("first", "up"),
                MoveDirection::Down => ("last", "down"),
            };
            Err(StoreError::PortAtBoundary {
                module: target_ref.module,
                port: target_ref.port,
                boundary,
                direction: dir_word,
            })
        }
    }
}
