// src/models/documento.rs
//
// Dígitos verificadores de CPF (pessoa física) e CNPJ (pessoa jurídica).

pub const TAMANHO_CPF: usize = 11;
pub const TAMANHO_CNPJ: usize = 14;

const PESOS_CNPJ_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const PESOS_CNPJ_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

fn digitos(documento: &str) -> Vec<u32> {
    documento.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn todos_iguais(digitos: &[u32]) -> bool {
    digitos.windows(2).all(|par| par[0] == par[1])
}

fn digito_verificador(soma: u32) -> u32 {
    match soma % 11 {
        resto if resto < 2 => 0,
        resto => 11 - resto,
    }
}

fn soma_ponderada(digitos: &[u32], pesos: impl Iterator<Item = u32>) -> u32 {
    digitos.iter().zip(pesos).map(|(d, p)| d * p).sum()
}

pub fn cpf_valido(cpf: &str) -> bool {
    let d = digitos(cpf);
    if d.len() != TAMANHO_CPF || todos_iguais(&d) {
        return false;
    }

    let dv1 = digito_verificador(soma_ponderada(&d[..9], (2..=10).rev()));
    let dv2 = digito_verificador(soma_ponderada(&d[..10], (2..=11).rev()));

    d[9] == dv1 && d[10] == dv2
}

pub fn cnpj_valido(cnpj: &str) -> bool {
    let d = digitos(cnpj);
    if d.len() != TAMANHO_CNPJ || todos_iguais(&d) {
        return false;
    }

    let dv1 = digito_verificador(soma_ponderada(&d[..12], PESOS_CNPJ_1.into_iter()));
    let dv2 = digito_verificador(soma_ponderada(&d[..13], PESOS_CNPJ_2.into_iter()));

    d[12] == dv1 && d[13] == dv2
}
