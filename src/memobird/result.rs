//! Vendor replies and the results decoded from them.

use serde::Deserialize;

/// `showapi_res_code` value meaning the call succeeded.
pub const RES_CODE_SUCCESS: i64 = 1;

/// `result` value meaning the paper was physically printed.
pub const RESULT_PRINTED: i64 = 1;

/// Result of a print request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintResult {
    /// The vendor accepted the request.
    pub success: bool,
    /// Error message reported by the vendor, if any.
    pub error: Option<String>,
    /// The device reports the content was printed.
    pub printed: bool,
    pub content_id: i64,
    /// Device id echoed by the vendor.
    pub device_id: String,
}

/// Result of a bind request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindResult {
    pub success: bool,
    pub error: Option<String>,
    /// Numeric user id assigned by the vendor.
    pub user_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrintPaperReply {
    #[serde(rename = "showapi_res_code", default)]
    code: i64,
    #[serde(rename = "showapi_res_error", default)]
    error: Option<String>,
    #[serde(rename = "printcontentID", default)]
    print_content_id: i64,
    #[serde(default)]
    result: i64,
    #[serde(rename = "smartGuid", default)]
    smart_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetUserBindReply {
    #[serde(rename = "showapi_res_code", default)]
    code: i64,
    #[serde(rename = "showapi_res_error", default)]
    error: Option<String>,
    #[serde(rename = "showapi_userid", default)]
    user_id: u64,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl From<PrintPaperReply> for PrintResult {
    fn from(reply: PrintPaperReply) -> Self {
        Self {
            success: reply.code == RES_CODE_SUCCESS,
            error: non_empty(reply.error),
            printed: reply.result == RESULT_PRINTED,
            content_id: reply.print_content_id,
            device_id: reply.smart_guid.unwrap_or_default(),
        }
    }
}

impl From<SetUserBindReply> for BindResult {
    fn from(reply: SetUserBindReply) -> Self {
        Self {
            success: reply.code == RES_CODE_SUCCESS,
            error: non_empty(reply.error),
            user_id: reply.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn print_result(json: &str) -> PrintResult {
        serde_json::from_str::<PrintPaperReply>(json).unwrap().into()
    }

    #[test]
    fn test_print_reply_success() {
        let result = print_result(
            r#"{"showapi_res_code":1,"showapi_res_error":"","printcontentID":4242,"result":1,"smartGuid":"abc123"}"#,
        );
        assert_eq!(
            result,
            PrintResult {
                success: true,
                error: None,
                printed: true,
                content_id: 4242,
                device_id: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_print_reply_accepted_not_printed() {
        let result = print_result(r#"{"showapi_res_code":1,"printcontentID":7,"result":2}"#);
        assert!(result.success);
        assert!(!result.printed);
        assert_eq!(result.device_id, "");
    }

    #[test]
    fn test_print_reply_logical_failure_keeps_error() {
        let result = print_result(r#"{"showapi_res_code":0,"showapi_res_error":"device offline"}"#);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("device offline"));
    }

    #[test]
    fn test_error_string_surfaces_even_on_success_code() {
        let result = print_result(r#"{"showapi_res_code":1,"showapi_res_error":"slow down","result":1}"#);
        assert!(result.success);
        assert_eq!(result.error.as_deref(), Some("slow down"));
    }

    #[test]
    fn test_null_fields_default() {
        let result = print_result(r#"{"showapi_res_code":1,"showapi_res_error":null,"smartGuid":null}"#);
        assert_eq!(result.error, None);
        assert_eq!(result.device_id, "");
    }

    #[test]
    fn test_bind_reply() {
        let ok: BindResult = serde_json::from_str::<SetUserBindReply>(
            r#"{"showapi_res_code":1,"showapi_res_error":"","showapi_userid":991}"#,
        )
        .unwrap()
        .into();
        assert_eq!(
            ok,
            BindResult {
                success: true,
                error: None,
                user_id: 991,
            }
        );

        let rejected: BindResult = serde_json::from_str::<SetUserBindReply>(
            r#"{"showapi_res_code":0,"showapi_res_error":"咕咕机未激活或者未绑定"}"#,
        )
        .unwrap()
        .into();
        assert!(!rejected.success);
        assert_eq!(rejected.error.as_deref(), Some("咕咕机未激活或者未绑定"));
        assert_eq!(rejected.user_id, 0);
    }
}
