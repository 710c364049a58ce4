//! Nginx site configuration
//!
//! Two server blocks: plain HTTP redirecting everything to HTTPS, and the
//! TLS block routing each proxied container by path prefix. Locations keep
//! container order.

use crate::project::{ContainerInstance, ProjectConfig};

pub fn certificate_dir(domain: &str) -> String {
    format!("/etc/letsencrypt/live/{}", domain)
}

pub fn compile(config: &ProjectConfig) -> String {
    let domain = config.domain.trim();
    let cert_dir = certificate_dir(domain);

    let mut out = String::new();
    out.push_str("server {\n");
    out.push_str("    listen 80;\n");
    out.push_str("    listen [::]:80;\n");
    out.push_str(&format!("    server_name {};\n\n", domain));
    out.push_str("    return 301 https://$host$request_uri;\n");
    out.push_str("}\n\n");

    out.push_str("server {\n");
    out.push_str("    listen 443 ssl;\n");
    out.push_str("    listen [::]:443 ssl;\n");
    out.push_str(&format!("    server_name {};\n\n", domain));
    out.push_str(&format!("    ssl_certificate {}/fullchain.pem;\n", cert_dir));
    out.push_str(&format!("    ssl_certificate_key {}/privkey.pem;\n", cert_dir));
    out.push_str("    ssl_protocols TLSv1.2 TLSv1.3;\n");

    for container in config.proxied_containers() {
        if let Some(block) = location_block(container) {
            out.push('\n');
            out.push_str(&block);
        }
    }

    out.push_str("}\n");
    out
}

fn location_block(container: &ContainerInstance) -> Option<String> {
    let path = container.location_path()?;
    let upstream = format!("http://localhost:{}", container.external_port);

    let directives: Vec<String> = if path == "/" {
        vec![
            format!("proxy_pass {};", upstream),
            "proxy_http_version 1.1;".into(),
            "proxy_set_header Upgrade $http_upgrade;".into(),
            "proxy_set_header Connection 'upgrade';".into(),
            "proxy_set_header Host $host;".into(),
            "proxy_cache_bypass $http_upgrade;".into(),
            "proxy_buffering off;".into(),
        ]
    } else {
        vec![
            format!("proxy_pass {};", upstream),
            "proxy_set_header Host $host;".into(),
            "proxy_set_header X-Real-IP $remote_addr;".into(),
            "proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;".into(),
            "proxy_set_header X-Forwarded-Proto $scheme;".into(),
        ]
    };

    let mut block = format!("    location {} {{\n", path);
    for directive in directives {
        block.push_str(&format!("        {}\n", directive));
    }
    block.push_str("    }\n");
    Some(block)
}
