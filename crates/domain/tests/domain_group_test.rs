use route_sync_domain::DomainGroup;
use std::net::Ipv4Addr;
use std::sync::Arc;

fn group(mask: Option<&str>, interfaces: Option<&str>) -> DomainGroup {
    DomainGroup::new(
        Some(1),
        Arc::from("vpn"),
        mask.map(Arc::from),
        interfaces.map(Arc::from),
    )
}

#[test]
fn test_interface_list_falls_back_to_default() {
    assert_eq!(group(None, None).interface_list("ISP"), vec!["ISP"]);
    assert_eq!(group(None, Some(" , ")).interface_list("ISP"), vec!["ISP"]);
}

#[test]
fn test_interface_list_keeps_order_and_dedups() {
    let g = group(None, Some("Wireguard0, Wireguard1,Wireguard0"));
    assert_eq!(g.interface_list("ISP"), vec!["Wireguard0", "Wireguard1"]);
}

#[test]
fn test_effective_mask_prefers_group() {
    assert_eq!(
        group(Some("32"), None).effective_mask("24").unwrap(),
        Ipv4Addr::new(255, 255, 255, 255)
    );
    assert_eq!(
        group(None, None).effective_mask("24").unwrap(),
        Ipv4Addr::new(255, 255, 255, 0)
    );
    assert_eq!(
        group(Some(""), None).effective_mask("16").unwrap(),
        Ipv4Addr::new(255, 255, 0, 0)
    );
}

#[test]
fn test_validate_name() {
    assert!(DomainGroup::validate_name("Work VPN").is_ok());
    assert!(DomainGroup::validate_name("").is_err());
    assert!(DomainGroup::validate_name("bad]name").is_err());
    assert!(DomainGroup::validate_name(&"a".repeat(101)).is_err());
}
