//! RCI request bodies and reply decoding.
//!
//! A call is a JSON array of commands; the reply is an array whose order
//! does not necessarily follow the request. Each reply element is decoded
//! into one of a closed set of shapes and the caller picks what it needs.

use route_sync_domain::netmask::HOST_MASK;
use route_sync_domain::{
    BatchOutcome, DomainError, RouteCandidate, RouteStatus, RouterInterface, RouterRoute,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Value};
use std::net::Ipv4Addr;
use tracing::warn;

const STATIC_ROUTES_URL: &str = "/staticRoutes";

fn change_notification() -> Value {
    json!({
        "webhelp": {
            "event": {
                "push": {
                    "data": json!({
                        "type": "configuration_change",
                        "value": { "url": STATIC_ROUTES_URL }
                    })
                    .to_string()
                }
            }
        }
    })
}

fn save_configuration() -> Value {
    json!({ "system": { "configuration": { "save": {} } } })
}

fn route_destination(route: &RouteCandidate, object: &mut Map<String, Value>) {
    if route.mask == HOST_MASK {
        object.insert("host".to_string(), json!(route.network.to_string()));
    } else {
        object.insert("network".to_string(), json!(route.network.to_string()));
        object.insert("mask".to_string(), json!(route.mask.to_string()));
    }
}

pub fn add_route_object(route: &RouteCandidate) -> Value {
    let mut object = Map::new();
    object.insert("gateway".to_string(), json!(""));
    object.insert("auto".to_string(), json!(true));
    object.insert("reject".to_string(), json!(false));
    object.insert("comment".to_string(), json!(route.comment));
    object.insert("interface".to_string(), json!(route.interface));
    route_destination(route, &mut object);
    Value::Object(object)
}

pub fn delete_route_object(route: &RouteCandidate) -> Value {
    let mut object = Map::new();
    object.insert("gateway".to_string(), json!(""));
    object.insert("interface".to_string(), json!(route.interface));
    route_destination(route, &mut object);
    object.insert("no".to_string(), json!(true));
    Value::Object(object)
}

/// `[notification, {ip: {route: ...}}..., save]`
pub fn mutate_batch(routes: &[RouteCandidate], delete: bool) -> Value {
    let mut commands = Vec::with_capacity(routes.len() + 2);
    commands.push(change_notification());
    for route in routes {
        let object = if delete {
            delete_route_object(route)
        } else {
            add_route_object(route)
        };
        commands.push(json!({ "ip": { "route": object } }));
    }
    commands.push(save_configuration());
    Value::Array(commands)
}

pub fn show_routes() -> Value {
    json!([{ "show": { "sc": { "ip": { "route": {} } } } }])
}

#[derive(Debug, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteReply {
    status: Vec<RawStatus>,
}

#[derive(Debug, Deserialize)]
pub struct IpReply {
    route: RouteReply,
}

#[derive(Debug, Deserialize)]
pub struct ShowIp {
    route: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ShowSc {
    ip: ShowIp,
}

#[derive(Debug, Deserialize)]
pub struct ShowReply {
    sc: ShowSc,
}

/// One element of an RCI reply array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RciReply {
    RouteTable { show: ShowReply },
    RouteStatus { ip: IpReply },
    Other(Value),
}

pub fn parse_reply(body: Value) -> Result<Vec<RciReply>, DomainError> {
    let Value::Array(elements) = body else {
        return Err(DomainError::UnexpectedResponse(
            "RCI reply is not an array".to_string(),
        ));
    };

    elements
        .into_iter()
        .map(|element| {
            serde_json::from_value(element)
                .map_err(|e| DomainError::UnexpectedResponse(format!("RCI reply element: {}", e)))
        })
        .collect()
}

/// Per-route statuses in reply order, gathered from every `ip.route.status`.
pub fn batch_outcome(replies: &[RciReply]) -> BatchOutcome {
    let statuses = replies
        .iter()
        .filter_map(|reply| match reply {
            RciReply::RouteStatus { ip } => Some(&ip.route.status),
            _ => None,
        })
        .flatten()
        .map(|raw| RouteStatus {
            ok: !raw.status.eq_ignore_ascii_case("error"),
            message: raw.message.clone(),
        })
        .collect();

    BatchOutcome::new(statuses)
}

/// The `show.sc.ip.route` table, or `None` when the reply has no such element.
pub fn route_table(replies: Vec<RciReply>) -> Option<Vec<RouterRoute>> {
    replies.into_iter().find_map(|reply| match reply {
        RciReply::RouteTable { show } => Some(parse_route_rows(show.sc.ip.route)),
        _ => None,
    })
}

/// Rows of the `ip/route` resource: an array, or an object keyed by index.
pub fn route_resource(body: Value) -> Result<Vec<RouterRoute>, DomainError> {
    match body {
        Value::Array(rows) => Ok(parse_route_rows(rows)),
        Value::Object(map) => Ok(parse_route_rows(map.into_iter().map(|(_, v)| v).collect())),
        _ => Err(DomainError::UnexpectedResponse(
            "ip/route resource is neither array nor object".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default, deserialize_with = "lenient_addr")]
    network: Option<Ipv4Addr>,
    #[serde(default, deserialize_with = "lenient_addr")]
    host: Option<Ipv4Addr>,
    #[serde(default, deserialize_with = "lenient_addr")]
    mask: Option<Ipv4Addr>,
    #[serde(default)]
    interface: String,
    #[serde(default)]
    gateway: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    auto: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    reject: bool,
}

fn lenient_addr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Ipv4Addr>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| s.trim().parse().ok()))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    })
}

fn parse_route_rows(rows: Vec<Value>) -> Vec<RouterRoute> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<RawRoute>(row) {
            Ok(raw) => Some(RouterRoute {
                network: raw.network,
                host: raw.host,
                mask: raw.mask,
                interface: raw.interface,
                gateway: raw.gateway.filter(|g| !g.is_empty()),
                comment: raw.comment.filter(|c| !c.is_empty()),
                auto: raw.auto,
                reject: raw.reject,
            }),
            Err(e) => {
                warn!(error = %e, "Skipping malformed router route row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawInterface {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// `show/interface` is an object keyed by interface id.
pub fn interfaces(body: Value) -> Result<Vec<RouterInterface>, DomainError> {
    let Value::Object(map) = body else {
        return Err(DomainError::UnexpectedResponse(
            "show/interface reply is not an object".to_string(),
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let raw: RawInterface = serde_json::from_value(value).ok()?;
            Some(RouterInterface {
                id: raw.id.unwrap_or(key),
                description: raw.description.filter(|d| !d.is_empty()),
            })
        })
        .collect())
}
