//! Method model: argument lists and return plumbing for every wrapper.

use std::collections::BTreeSet;

use bluegen_common::Method;
use tracing::debug;

use super::cast::{cast_type, split_top_level, uses_bus_types};
use super::docs::prepare_docs;
use super::types::{Capabilities, Capability, MethodDoc, ReturnVar, ReturnVars};

/// Go error type closing every wrapper signature.
pub const ERROR_TYPE: &str = "error";

/// Marker the docs append to methods a daemon may not implement.
const OPTIONAL_MARKER: &str = " (optional)";

/// Build the wrapper model for every usable method, in document order.
///
/// Methods whose name is empty once the optional marker is removed are
/// placeholders in the docs and are dropped. A later method resolving to an
/// already used name is dropped as well.
pub fn build_methods(methods: &[Method], doc_width: usize, caps: &mut Capabilities) -> Vec<MethodDoc> {
    let mut seen = BTreeSet::new();
    methods
        .iter()
        .filter_map(|method| {
            let doc = build_method(method, doc_width);
            if doc.method.name.is_empty() {
                debug!(raw_name = %method.name, "Dropping method without a name.");
                return None;
            }
            if !seen.insert(doc.method.name.clone()) {
                debug!(raw_name = %method.name, "Dropping duplicate method.");
                return None;
            }

            if [&doc.args_list, &doc.params_list, &doc.return_signature]
                .into_iter()
                .any(|fragment| uses_bus_types(fragment))
            {
                caps.insert(Capability::BusTypes);
            }
            Some(doc)
        })
        .collect()
}

fn build_method(method: &Method, doc_width: usize) -> MethodDoc {
    let args_list = method
        .args
        .iter()
        .map(|arg| format!("{} {}", arg.name, cast_type(&arg.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let params_list = method
        .args
        .iter()
        .map(|arg| arg.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let return_type = cast_type(&method.return_type);
    let single_return = return_type.is_empty();

    let (return_signature, return_vars) = if single_return {
        (ERROR_TYPE.to_string(), None)
    } else {
        let types = split_top_level(&return_type);
        let vars: Vec<ReturnVar> = types
            .iter()
            .enumerate()
            .map(|(i, ty)| ReturnVar {
                name: format!("val{i}"),
                ty: (*ty).to_string(),
            })
            .collect();

        let definition = vars
            .iter()
            .map(|var| format!("var {} {}", var.name, var.ty))
            .collect::<Vec<_>>()
            .join("\n\t");
        let refs = vars
            .iter()
            .map(|var| format!("&{}", var.name))
            .collect::<Vec<_>>()
            .join(", ");
        let list = vars
            .iter()
            .map(|var| var.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        (
            format!("({}, {ERROR_TYPE})", types.join(", ")),
            Some(ReturnVars {
                vars,
                definition,
                refs,
                list,
            }),
        )
    };

    MethodDoc {
        method: Method {
            name: method.name.replace(OPTIONAL_MARKER, "").trim().to_string(),
            args: method.args.clone(),
            return_type,
            docs: prepare_docs(&method.docs, true, 0, doc_width),
        },
        args_list,
        params_list,
        single_return,
        return_signature,
        return_vars,
    }
}
