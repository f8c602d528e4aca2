mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use catalogo_api::{
    db::ProdutoRepository,
    handlers::IDS_DIFERENTES,
    services::{
        imagem_service::{BASE64_INVALIDO, IMAGEM_OBRIGATORIA},
        produto_service::FORNECEDOR_INEXISTENTE,
    },
};
use common::{body_json, empty_request, errors_of, json_request, TestApp, DOCUMENTO_CNPJ};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

const IMAGEM_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nconteudo-da-imagem";
const BOUNDARY: &str = "----catalogo-boundary";

fn produto_json(fornecedor_id: &Value) -> Value {
    json!({
        "fornecedorId": fornecedor_id,
        "nome": "Caneta Azul",
        "descricao": "Caneta esferográfica azul",
        "imagemUpload": STANDARD.encode(IMAGEM_BYTES),
        "imagem": "caneta.png",
        "valor": 10.5,
        "ativo": true
    })
}

fn multipart_request(uri: &str, token: &str, fields: &[(&str, &str)], arquivo: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (nome, valor) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{nome}\"\r\n\r\n{valor}\r\n").as_bytes(),
        );
    }
    if let Some((campo, nome_arquivo, conteudo)) = arquivo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{campo}\"; filename=\"{nome_arquivo}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(conteudo);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

fn arquivos_gravados(app: &TestApp) -> Vec<String> {
    std::fs::read_dir(app.imagens.path())
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn create_with_base64_image_writes_the_file() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;

    let body = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
            .await,
    )
    .await;
    assert_eq!(body["success"], true, "{body}");

    let imagem = body["data"]["imagem"].as_str().unwrap().to_string();
    let (prefixo, resto) = imagem.split_once('_').unwrap();
    assert!(Uuid::parse_str(prefixo).is_ok());
    assert_eq!(resto, "caneta.png");
    assert_eq!(std::fs::read(app.imagens.path().join(&imagem)).unwrap(), IMAGEM_BYTES);

    let id = body["data"]["id"].as_str().unwrap();
    let body = body_json(app.send(empty_request("GET", &format!("/api/v1/produtos/{id}"), Some(&token))).await).await;
    assert_eq!(body["data"]["nomeFornecedor"], "Papelaria Central");
    assert_eq!(body["data"]["valor"], 10.5);

    let body = body_json(app.send(empty_request("GET", "/api/produtos", Some(&token))).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_or_broken_image_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;

    let mut payload = produto_json(&fornecedor["id"]);
    payload["imagemUpload"] = json!("");
    let body = body_json(app.send(json_request("POST", "/api/produtos", Some(&token), payload)).await).await;
    assert_eq!(errors_of(&body), vec![IMAGEM_OBRIGATORIA.to_string()]);

    let mut payload = produto_json(&fornecedor["id"]);
    payload["imagemUpload"] = json!("isto não é base64!");
    let body = body_json(app.send(json_request("POST", "/api/produtos", Some(&token), payload)).await).await;
    assert_eq!(errors_of(&body), vec![BASE64_INVALIDO.to_string()]);

    assert!(app.catalog.get_all_with_fornecedor().await.unwrap().is_empty());
    assert!(arquivos_gravados(&app).is_empty());
}

#[tokio::test]
async fn invalid_model_is_not_persisted() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;

    let mut payload = produto_json(&fornecedor["id"]);
    payload["nome"] = json!("C");
    payload["valor"] = json!(null);
    let body = body_json(app.send(json_request("POST", "/api/produtos", Some(&token), payload)).await).await;

    assert_eq!(body["success"], false);
    let errors = errors_of(&body);
    assert!(errors.contains(&"O campo Nome precisa ter entre 2 e 200 caracteres".to_string()));
    assert!(errors.contains(&"O campo Valor é obrigatório".to_string()));
    assert!(app.catalog.get_all_with_fornecedor().await.unwrap().is_empty());
    assert!(arquivos_gravados(&app).is_empty());
}

#[tokio::test]
async fn produto_needs_an_existing_fornecedor() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let body = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&json!(Uuid::new_v4()))))
            .await,
    )
    .await;

    assert_eq!(errors_of(&body), vec![FORNECEDOR_INEXISTENTE.to_string()]);
    assert!(app.catalog.get_all_with_fornecedor().await.unwrap().is_empty());
    assert!(arquivos_gravados(&app).is_empty());
}

#[tokio::test]
async fn rejected_create_leaves_no_image_behind() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;

    let mut payload = produto_json(&fornecedor["id"]);
    payload["valor"] = json!(0);
    let body = body_json(app.send(json_request("POST", "/api/produtos", Some(&token), payload)).await).await;
    assert_eq!(errors_of(&body), vec!["O campo Valor precisa ser maior que 0".to_string()]);

    let fornecedor_inexistente = Uuid::new_v4().to_string();
    let request = multipart_request(
        "/api/produtos/adicionar",
        &token,
        &[
            ("FornecedorId", fornecedor_inexistente.as_str()),
            ("Nome", "Caderno"),
            ("Descricao", "Caderno universitário"),
            ("Valor", "25.90"),
        ],
        Some(("ImagemUpload", "caderno.png", IMAGEM_BYTES)),
    );
    let body = body_json(app.send(request).await).await;
    assert_eq!(errors_of(&body), vec![FORNECEDOR_INEXISTENTE.to_string()]);

    assert!(app.catalog.get_all_with_fornecedor().await.unwrap().is_empty());
    assert!(arquivos_gravados(&app).is_empty());
}

#[tokio::test]
async fn client_id_is_ignored_on_create() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let primeiro = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
            .await,
    )
    .await["data"]
        .clone();

    let mut payload = produto_json(&fornecedor["id"]);
    payload["id"] = primeiro["id"].clone();
    payload["nome"] = json!("Lápis Preto");
    let body = body_json(app.send(json_request("POST", "/api/produtos", Some(&token), payload)).await).await;
    assert_eq!(body["success"], true, "{body}");
    assert_ne!(body["data"]["id"], primeiro["id"]);

    let original = app
        .catalog
        .get_with_fornecedor(primeiro["id"].as_str().unwrap().parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(original.nome, "Caneta Azul");
    assert_eq!(app.catalog.get_all_with_fornecedor().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_without_claim_is_forbidden() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&admin, DOCUMENTO_CNPJ).await;
    let token = app.token_with(&[("Fornecedor", "Adicionar")]).await;

    let response = app
        .send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_with_mismatched_ids_changes_nothing() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let created = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
            .await,
    )
    .await["data"]
        .clone();
    let id = created["id"].as_str().unwrap();

    let mut payload = created.clone();
    payload["id"] = json!(Uuid::new_v4());
    payload["nome"] = json!("Lápis Preto");
    let body = body_json(app.send(json_request("PUT", &format!("/api/produtos/{id}"), Some(&token), payload)).await).await;

    assert_eq!(errors_of(&body), vec![IDS_DIFERENTES.to_string()]);
    let stored = app.catalog.get_with_fornecedor(id.parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.nome, "Caneta Azul");
}

#[tokio::test]
async fn invalid_update_never_reaches_the_repository() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let id = Uuid::new_v4();

    let payload = json!({
        "id": id,
        "fornecedorId": Uuid::new_v4(),
        "nome": "X",
        "descricao": "Y",
        "valor": 10.5,
        "ativo": true
    });
    let response = app
        .send(json_request("PUT", &format!("/api/produtos/{id}"), Some(&token), payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    let errors = errors_of(&body);
    assert!(errors.contains(&"O campo Nome precisa ter entre 2 e 200 caracteres".to_string()));
    assert!(errors.contains(&"O campo Descricao precisa ter entre 2 e 1000 caracteres".to_string()));
    assert_eq!(app.produto_count_calls(), 0);
}

#[tokio::test]
async fn update_without_new_image_keeps_the_old_one() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let created = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
            .await,
    )
    .await["data"]
        .clone();
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let antes = app.catalog.get_with_fornecedor(id).await.unwrap().unwrap();

    let mut payload = created.clone();
    payload["imagem"] = json!("");
    payload["imagemUpload"] = json!(null);
    payload["nome"] = json!("Caneta Vermelha");
    payload["valor"] = json!(12.25);
    let body = body_json(app.send(json_request("PUT", &format!("/api/v2/produtos/{id}"), Some(&token), payload)).await).await;
    assert_eq!(body["success"], true, "{body}");

    let depois = app.catalog.get_with_fornecedor(id).await.unwrap().unwrap();
    assert_eq!(depois.nome, "Caneta Vermelha");
    assert_eq!(depois.valor, Decimal::new(1225, 2));
    assert_eq!(depois.imagem, antes.imagem);
    assert_eq!(depois.data_cadastro, antes.data_cadastro);
    assert_eq!(arquivos_gravados(&app).len(), 1);
}

#[tokio::test]
async fn multipart_create_writes_the_uploaded_file() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let fornecedor_id = fornecedor["id"].as_str().unwrap();

    let request = multipart_request(
        "/api/produtos/adicionar",
        &token,
        &[
            ("FornecedorId", fornecedor_id),
            ("Nome", "Caderno"),
            ("Descricao", "Caderno universitário"),
            ("Valor", "25,90"),
            ("Ativo", "true"),
        ],
        Some(("ImagemUpload", "caderno.png", IMAGEM_BYTES)),
    );
    let body = body_json(app.send(request).await).await;
    assert_eq!(body["success"], true, "{body}");

    let imagem = body["data"]["imagem"].as_str().unwrap();
    assert!(imagem.ends_with("_caderno.png"));
    assert_eq!(std::fs::read(app.imagens.path().join(imagem)).unwrap(), IMAGEM_BYTES);

    let produtos = app.catalog.get_all_with_fornecedor().await.unwrap();
    assert_eq!(produtos.len(), 1);
    assert_eq!(produtos[0].valor, Decimal::new(2590, 2));
    assert!(produtos[0].ativo);
}

#[tokio::test]
async fn multipart_create_without_file_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let fornecedor_id = fornecedor["id"].as_str().unwrap();

    let request = multipart_request(
        "/api/produtos/adicionar",
        &token,
        &[
            ("fornecedorId", fornecedor_id),
            ("nome", "Caderno"),
            ("descricao", "Caderno universitário"),
            ("valor", "25.90"),
        ],
        None,
    );
    let body = body_json(app.send(request).await).await;

    assert_eq!(errors_of(&body), vec![IMAGEM_OBRIGATORIA.to_string()]);
    assert!(app.catalog.get_all_with_fornecedor().await.unwrap().is_empty());
}

#[tokio::test]
async fn image_endpoint_echoes_the_file_metadata() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let request = multipart_request(
        "/api/produtos/imagem",
        &token,
        &[],
        Some(("arquivo", "foto.png", IMAGEM_BYTES)),
    );
    let body = body_json(app.send(request).await).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["nomeArquivo"], "foto.png");
    assert_eq!(body["data"]["contentType"], "image/png");
    assert_eq!(body["data"]["tamanho"], IMAGEM_BYTES.len());
    assert!(arquivos_gravados(&app).is_empty());
}

#[tokio::test]
async fn delete_removes_the_produto() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let fornecedor = app.create_fornecedor(&token, DOCUMENTO_CNPJ).await;
    let created = body_json(
        app.send(json_request("POST", "/api/produtos", Some(&token), produto_json(&fornecedor["id"])))
            .await,
    )
    .await["data"]
        .clone();
    let uri = format!("/api/produtos/{}", created["id"].as_str().unwrap());

    let body = body_json(app.send(empty_request("DELETE", &uri, Some(&token))).await).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["nome"], "Caneta Azul");

    let response = app.send(empty_request("GET", &uri, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(empty_request("DELETE", &uri, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
