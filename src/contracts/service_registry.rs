use ethers::prelude::*;

abigen!(
    ServiceRegistry,
    r#"[
        event ServiceRegistered(string name, string category)
        function registerService(string name, string category, string description)
        function getService(string name) view returns (string, string, string)
        function isServiceRegistered(string name) view returns (bool)
    ]"#
);
