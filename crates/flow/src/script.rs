//! The built-in qualification script.

use crate::step::{ChoiceKeywords, Step, StepId, Transitions};

pub const CLARIFICATION_MESSAGE: &str = "Desculpe, não entendi muito bem. 😊 Por favor, escolha uma das opções acima (A, B ou C) ou responda de forma mais clara.";

pub static STANDARD_STEPS: [Step; 7] = [
    Step {
        id: StepId::Start,
        message: "Oii 😊 antes de te direcionar para falar com o William, preciso te fazer 3 perguntas rápidas pra entender se esse projeto realmente faz sentido pra você. Pode ser?",
        keywords: Some(ChoiceKeywords {
            a: &[
                "sim",
                "pode",
                "claro",
                "ok",
                "bora",
                "com certeza",
                "aceito",
                "quero",
                "s",
                "pode ser",
            ],
            b: &[],
            c: &["nao", "agora nao", "obrigado", "n", "nem pensar"],
        }),
        transitions: Some(Transitions {
            a: StepId::Question1,
            b: StepId::Question1,
            c: StepId::Declined,
            unrecognized: Some(StepId::Start),
        }),
    },
    Step {
        id: StepId::Question1,
        message: "Hoje você está buscando:\n\nA) Uma renda extra trabalhando de casa\nB) Uma nova fonte de renda principal\nC) Só estou curioso(a)",
        keywords: Some(ChoiceKeywords {
            a: &[
                "a",
                "extra",
                "casa",
                "trabalhando",
                "renda extra",
                "bico",
                "complemento",
                "trabalhar de casa",
            ],
            b: &[
                "b",
                "principal",
                "viver disso",
                "fonte",
                "carreira",
                "integral",
                "foco",
                "minha fonte",
            ],
            c: &[
                "c",
                "curioso",
                "olhando",
                "vendo",
                "curiosidade",
                "saber mais",
                "so vendo",
                "so curioso",
            ],
        }),
        transitions: Some(Transitions {
            a: StepId::Question2,
            b: StepId::Question2,
            c: StepId::Question1FollowUp,
            unrecognized: None,
        }),
    },
    Step {
        id: StepId::Question1FollowUp,
        message: "Entendi 😊 esse projeto é pra quem realmente quer colocar em prática. Você pretende aplicar se fizer sentido pra você?",
        keywords: Some(ChoiceKeywords {
            a: &[
                "sim",
                "vou",
                "pretendo",
                "aplicar",
                "quero",
                "s",
                "com certeza",
                "pode ser",
            ],
            b: &[],
            c: &["nao", "so curioso", "so olhando", "n", "nao pretendo"],
        }),
        transitions: Some(Transitions {
            a: StepId::Question2,
            b: StepId::Question2,
            c: StepId::Declined,
            unrecognized: None,
        }),
    },
    Step {
        id: StepId::Question2,
        message: "O William trabalha com alho há mais de 6 anos, tem mais de 6 mil seguidores e já ajudou mais de 140 pessoas a começarem.\n\nSe ele te mostrar o passo a passo simples usando só o celular, você teria pelo menos 1 hora por dia pra aplicar?\n\nA) Tenho sim\nB) Depende\nC) Não tenho tempo",
        keywords: Some(ChoiceKeywords {
            a: &[
                "a",
                "tenho",
                "sim",
                "com certeza",
                "consigo",
                "posso",
                "1 hora",
                "uma hora",
                "tenho sim",
            ],
            b: &[
                "b",
                "depende",
                "talvez",
                "ver",
                "preciso ver",
                "nao sei",
                "dependendo",
            ],
            c: &[
                "c",
                "nao tenho",
                "sem tempo",
                "corrido",
                "impossivel",
                "nao",
                "n",
                "tenho nao",
            ],
        }),
        transitions: Some(Transitions {
            a: StepId::Question3,
            b: StepId::Question3,
            c: StepId::Declined,
            unrecognized: None,
        }),
    },
    Step {
        id: StepId::Question3,
        message: "Pra entrar no projeto é necessário um pequeno investimento inicial (menos do que você gasta em uma pizza 🍕).\n\nSe fizer sentido pra você, isso seria um problema?\n\nA) Não seria problema\nB) Depende do valor\nC) No momento não posso investir nada",
        keywords: Some(ChoiceKeywords {
            a: &[
                "a",
                "nao seria",
                "problema nao",
                "tranquilo",
                "posso",
                "sim",
                "nao e problema",
                "ok",
                "sem problema",
            ],
            b: &[
                "b",
                "depende",
                "valor",
                "quanto",
                "preciso saber",
                "dependendo",
                "depende do valor",
            ],
            c: &[
                "c",
                "nao posso",
                "sem dinheiro",
                "nada",
                "investir nada",
                "impossivel",
                "n",
                "agora nao",
            ],
        }),
        transitions: Some(Transitions {
            a: StepId::Success,
            b: StepId::Success,
            c: StepId::Declined,
            unrecognized: None,
        }),
    },
    Step {
        id: StepId::Success,
        message: "Perfeito 👏 pelo que você me respondeu, seu perfil é ideal.\n\nO William vai falar com você pessoalmente agora e explicar como você pode começar ainda essa semana.\n\nClique no botão abaixo para falar direto com ele 👇",
        keywords: None,
        transitions: None,
    },
    Step {
        id: StepId::Declined,
        message: "Entendo perfeitamente 😊 talvez esse não seja o melhor momento pra você. Quando decidir começar algo de verdade ou estiver pronto(a), será um prazer te receber!",
        keywords: None,
        transitions: None,
    },
];
