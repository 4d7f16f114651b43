//! Server-rendered pages for the public catalog and the login/upload forms.

use std::fmt::Write;

use crate::services::catalog_service::{ProjetoEntry, TipoLink};
use crate::services::storage::STATIC_FILES_URL;
use crate::services::thumbnail_service::thumbname;

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn file_url(name: &str) -> String {
    format!("{}/{}", STATIC_FILES_URL, name)
}

pub fn thumbnail_url(path: &str) -> String {
    file_url(&thumbname(path))
}

/// Admin list column for image-bearing rows: the thumbnail, never the original.
pub fn list_thumbnail(path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("<img src=\"{}\">", escape(&thumbnail_url(p))),
        None => String::new(),
    }
}

fn layout(title: &str, nav: &[TipoLink], body: &str) -> String {
    let mut links = String::new();
    for tipo in nav {
        let _ = write!(
            links,
            "<li><a href=\"/projetos/{}\">{}</a></li>",
            tipo.id,
            escape(&tipo.nome)
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><ul class=\"tipos\">{}</ul></nav>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        links,
        body
    )
}

pub fn index_page(tipos: &[TipoLink]) -> String {
    let body = if tipos.is_empty() {
        "<p class=\"empty\">Nenhum tipo cadastrado.</p>".to_string()
    } else {
        "<h1>Projetos</h1>".to_string()
    };
    layout("Projetos", tipos, &body)
}

pub fn projetos_page(tipos: &[TipoLink], entries: &[ProjetoEntry]) -> String {
    let heading = entries
        .first()
        .and_then(|e| e.tipo.as_ref())
        .map(|t| t.nome.to_lowercase())
        .unwrap_or_else(|| "projetos".to_string());

    let mut body = format!("<h1>{}</h1>\n<section class=\"projetos\">\n", escape(&heading));

    for entry in entries {
        let p = &entry.projeto;
        let _ = write!(body, "<article class=\"projeto\" id=\"projeto-{}\">", p.id);
        if let Some(path) = p.path.as_deref().filter(|p| !p.is_empty()) {
            let _ = write!(
                body,
                "<img class=\"capa\" src=\"{}\" alt=\"{}\">",
                escape(&thumbnail_url(path)),
                escape(&p.nome)
            );
        }
        let _ = write!(body, "<h2>{}</h2>", escape(&p.nome));
        if let Some(cliente) = p.cliente.as_deref() {
            let _ = write!(body, "<p class=\"cliente\">{}</p>", escape(cliente));
        }

        if !entry.fotos.is_empty() {
            body.push_str("<ul class=\"fotos\">");
            for foto in &entry.fotos {
                let titulo = foto.titulo.as_deref().unwrap_or("");
                body.push_str("<li>");
                match foto.path.as_deref().filter(|p| !p.is_empty()) {
                    Some(path) => {
                        let _ = write!(
                            body,
                            "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>",
                            escape(&file_url(path)),
                            escape(&thumbnail_url(path)),
                            escape(titulo)
                        );
                    }
                    None => {
                        let _ = write!(body, "<span>{}</span>", escape(titulo));
                    }
                }
                if let Some(legenda) = foto.legenda.as_deref() {
                    let _ = write!(body, "<p class=\"legenda\">{}</p>", escape(legenda));
                }
                body.push_str("</li>");
            }
            body.push_str("</ul>");
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>");

    layout(&heading, tipos, &body)
}

pub fn not_found_page(tipos: &[TipoLink], identifier: &str) -> String {
    let body = format!(
        "<h1>Página não encontrada</h1><p>Tipo desconhecido: {}</p>",
        escape(identifier)
    );
    layout("Não encontrado", tipos, &body)
}

pub fn login_page(next: Option<&str>, error: Option<&str>) -> String {
    let mut body = String::from("<h1>Login</h1>");
    if let Some(error) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape(error));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/login\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Senha <input type=\"password\" name=\"password\" required></label>\
         <input type=\"hidden\" name=\"next\" value=\"{}\">\
         <button type=\"submit\">Entrar</button></form>",
        escape(next.unwrap_or(""))
    );
    layout("Login", &[], &body)
}

pub fn upload_page() -> String {
    let body = "<h1>Upload</h1>\
                <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
                <input type=\"file\" name=\"file[]\" multiple>\
                <button type=\"submit\">Enviar</button></form>";
    layout("Upload", &[], body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Casa\" & 'Loja'</b>"), "&lt;b&gt;&quot;Casa&quot; &amp; &#x27;Loja&#x27;&lt;/b&gt;");
    }

    #[test]
    fn test_list_thumbnail_uses_thumbnail() {
        assert_eq!(
            list_thumbnail(Some("a.jpg")),
            "<img src=\"/static/files/a_thumb.jpg\">"
        );
        assert_eq!(list_thumbnail(None), "");
        assert_eq!(list_thumbnail(Some("")), "");
    }

    #[test]
    fn test_index_page_links_types() {
        let tipos = vec![
            TipoLink { id: 1, nome: "residencial".into() },
            TipoLink { id: 2, nome: "comercial".into() },
        ];
        let html = index_page(&tipos);
        assert!(html.contains("<a href=\"/projetos/1\">residencial</a>"));
        assert!(html.contains("<a href=\"/projetos/2\">comercial</a>"));
    }

    #[test]
    fn test_login_page_keeps_next() {
        let html = login_page(Some("/admin/fotos"), Some("Invalid credentials"));
        assert!(html.contains("value=\"/admin/fotos\""));
        assert!(html.contains("Invalid credentials"));
    }
}
