//! Raw feature invocation: any advertised feature, any JSON payload.

use livebox_api::{Error, FeatureRequest, HttpMethod, LiveboxClient};
use livebox_core::Livebox;
use serde_json::Value;

use crate::cli::{CallArgs, CallMethod, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<CallMethod> for HttpMethod {
    fn from(method: CallMethod) -> Self {
        match method {
            CallMethod::Get => Self::Get,
            CallMethod::Put => Self::Put,
            CallMethod::Post => Self::Post,
            CallMethod::Delete => Self::Delete,
        }
    }
}

fn build_request(args: &CallArgs) -> Result<FeatureRequest, CliError> {
    let mut request = FeatureRequest::new(args.feature.clone(), args.method.into());
    for raw in &args.vars {
        let (name, value) = util::parse_assignment(raw)?;
        request = request.path_var(name, value);
    }

    let body = match (&args.data, &args.data_file) {
        (Some(inline), _) => Some(serde_json::from_str::<Value>(inline)?),
        (None, Some(path)) => Some(util::read_json_file(path)?),
        (None, None) => None,
    };
    Ok(match body {
        Some(body) => request.json(&body),
        None => request,
    })
}

pub async fn handle(livebox: &Livebox, args: CallArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let request = build_request(&args)?;
    tracing::debug!(feature = %args.feature, method = ?args.method, "raw call");

    // An empty 2xx body is a valid answer to an action.
    let value = match livebox.client().invoke::<Value>(request).await {
        Ok(value) => value,
        Err(Error::NoData) => Value::Null,
        Err(e) => return Err(e.into()),
    };

    let out = output::render_value(global.output, &value)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(vars: &[&str], data: Option<&str>) -> CallArgs {
        CallArgs {
            feature: "WlanAccessPoint".into(),
            method: CallMethod::Put,
            vars: vars.iter().map(|v| (*v).to_owned()).collect(),
            data: data.map(str::to_owned),
            data_file: None,
        }
    }

    #[test]
    fn builds_request_with_vars_and_body() {
        let request = build_request(&args(&["wlan_ifc=wl0", "wlan_ap=AABB"], Some(r#"{"SSID":"x"}"#))).unwrap();
        assert_eq!(request.feature, "WlanAccessPoint");
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path_vars.get("wlan_ifc").map(String::as_str), Some("wl0"));
        assert!(request.body.is_some());
    }

    #[test]
    fn malformed_inline_json_is_rejected() {
        let err = build_request(&args(&[], Some("{oops"))).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn data_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"[{"Id":"1"}]"#).unwrap();

        let mut call = args(&[], None);
        call.data_file = Some(path);
        assert!(build_request(&call).unwrap().body.is_some());
    }
}
