//! Constructor synthesis from the documented service and object path.
//!
//! The docs describe where an interface lives in loose prose:
//! - `org.bluez` / `unique name` for the service
//! - `/org/bluez`, `[variable prefix]/{hci0,hci1,...}` or `freely definable` for the path
//!
//! Concrete values become literals; anything variable becomes a constructor
//! parameter.

use bluegen_common::Api;

use super::cast::{OBJECT_PATH_TYPE, uses_bus_types};
use super::types::{Capabilities, Capability, Constructor, ConstructorArg};

/// Go package providing `Sprintf`, as referenced from generated expressions.
pub const FORMATTING_MARKER: &str = "fmt.";

const VARIABLE_PREFIX: &str = "[variable prefix]";

/// How a documented object path maps to Go.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathForm {
    /// A fixed absolute path.
    Literal(String),
    /// An adapter object under the variable prefix (`{hci0,hci1,...}`).
    Adapter,
    /// Anything the caller has to provide.
    Opaque,
}

fn classify_path(path: &str) -> PathForm {
    let path = path.trim();

    if let Some(rest) = path.strip_prefix(VARIABLE_PREFIX) {
        let rest = rest.trim_start_matches('/');
        if rest.starts_with('{') && !rest.contains('/') {
            return PathForm::Adapter;
        }
        return PathForm::Opaque;
    }

    if path.starts_with('/') && !path.contains(['{', '[', ' ']) {
        return PathForm::Literal(path.to_string());
    }

    PathForm::Opaque
}

fn arg(name: &str, ty: &str, docs: &str) -> ConstructorArg {
    ConstructorArg {
        name: name.to_string(),
        ty: ty.to_string(),
        docs: docs.to_string(),
    }
}

fn constructor(suffix: &str, args: Vec<ConstructorArg>, object_path: String, service: &str) -> Constructor {
    let args_list = args
        .iter()
        .map(|arg| format!("{} {}", arg.name, arg.ty))
        .collect::<Vec<_>>()
        .join(", ");
    Constructor {
        suffix: suffix.to_string(),
        args,
        args_list,
        object_path,
        service: service.to_string(),
    }
}

/// Synthesize the constructors for one interface.
///
/// `variable_prefix` is the concrete path substituted for `[variable prefix]`
/// when a constructor builds the path from an adapter id.
pub fn build_constructors(api: &Api, variable_prefix: &str, caps: &mut Capabilities) -> Vec<Constructor> {
    let service_name = api.service.trim();
    let (service_args, service) =
        if service_name.is_empty() || service_name.contains(char::is_whitespace) {
            (
                vec![arg("servicePath", "string", "Unique name of the service")],
                "servicePath".to_string(),
            )
        } else {
            (Vec::new(), format!("\"{service_name}\""))
        };

    let with_service = |extra: Vec<ConstructorArg>| {
        let mut args = service_args.clone();
        args.extend(extra);
        args
    };

    let opaque = || {
        constructor(
            "",
            with_service(vec![arg("objectPath", OBJECT_PATH_TYPE, "Object path of the instance")]),
            "objectPath".to_string(),
            &service,
        )
    };

    let constructors = match classify_path(&api.object_path) {
        PathForm::Literal(path) => vec![constructor(
            "",
            with_service(Vec::new()),
            format!("\"{path}\""),
            &service,
        )],
        PathForm::Opaque => vec![opaque()],
        PathForm::Adapter => {
            let prefix = variable_prefix.trim_end_matches('/').replace('%', "%%");
            vec![
                opaque(),
                constructor(
                    "FromAdapterID",
                    with_service(vec![arg("adapterID", "string", "Adapter ID (eg. hci0)")]),
                    format!("{OBJECT_PATH_TYPE}({FORMATTING_MARKER}Sprintf(\"{prefix}/%s\", adapterID))"),
                    &service,
                ),
            ]
        }
    };

    for ctor in &constructors {
        if uses_bus_types(&ctor.object_path) || ctor.args.iter().any(|arg| uses_bus_types(&arg.ty)) {
            caps.insert(Capability::BusTypes);
        }
        if ctor.object_path.contains(FORMATTING_MARKER) || ctor.service.contains(FORMATTING_MARKER) {
            caps.insert(Capability::Formatting);
        }
    }

    constructors
}
