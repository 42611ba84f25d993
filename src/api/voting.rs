use rocket::{serde::json::Json, Route, State};

use crate::{
    client::{RegistrationClient, VotingClient},
    error::{Error, Result},
    model::{
        api::{Candidate, IssueCredentialRequest, TallyEntry, VoteSubmission},
        catalog::CandidateCatalog,
        envelope::Envelope,
        tally,
    },
};

/// Validation message for a missing citizen card number.
pub const MSG_CARD_REQUIRED: &str = "Número de Cartão de Cidadão é obrigatório.";
/// Rejection message when the AR denies eligibility or issues no credential.
pub const MSG_NOT_ELIGIBLE: &str = "Eleitor não elegível.";
/// Validation message for a missing credential.
pub const MSG_CREDENTIAL_REQUIRED: &str = "Credencial inválida.";
/// Default rejection message when the AV refuses a ballot without a reason.
pub const MSG_VOTE_REJECTED: &str = "Voto rejeitado.";

pub fn routes() -> Vec<Route> {
    routes![issue_credential, get_candidates, submit_vote, get_results]
}

#[post("/credential", data = "<request>", format = "json")]
async fn issue_credential(
    request: Json<IssueCredentialRequest>,
    registration: &State<RegistrationClient>,
) -> Result<Json<Envelope<String>>> {
    let citizen_card_number = request.citizen_card_number.trim();
    if citizen_card_number.is_empty() {
        return Err(Error::validation(MSG_CARD_REQUIRED));
    }

    let grant = registration
        .issue_voting_credential(citizen_card_number)
        .await?;

    // An eligible elector without an issued credential is still a refusal.
    if !grant.is_eligible || grant.voting_credential.trim().is_empty() {
        return Err(Error::rejection(MSG_NOT_ELIGIBLE));
    }

    Ok(Json(Envelope::success(grant.voting_credential)))
}

#[get("/candidates")]
async fn get_candidates(
    voting: &State<VotingClient>,
    catalog: &State<CandidateCatalog>,
) -> Result<Json<Envelope<Vec<Candidate>>>> {
    let candidates = voting
        .get_candidates()
        .await?
        .into_iter()
        .map(|option| enrich(option.id, option.name, catalog))
        .collect();

    Ok(Json(Envelope::success(candidates)))
}

#[post("/vote", data = "<submission>", format = "json")]
async fn submit_vote(
    submission: Json<VoteSubmission>,
    voting: &State<VotingClient>,
) -> Result<Json<Envelope<bool>>> {
    let submission = submission.into_inner();
    if submission.credential.trim().is_empty() {
        return Err(Error::validation(MSG_CREDENTIAL_REQUIRED));
    }

    let decision = voting
        .vote(&submission.credential, submission.candidate_id)
        .await?;

    if !decision.success {
        // Pass the authority's reason through verbatim when it gives one.
        let message = if decision.message.trim().is_empty() {
            MSG_VOTE_REJECTED.to_string()
        } else {
            decision.message
        };
        return Err(Error::rejection(message));
    }

    Ok(Json(Envelope::success(true)))
}

#[get("/results")]
async fn get_results(voting: &State<VotingClient>) -> Result<Json<Envelope<Vec<TallyEntry>>>> {
    let lines = voting.get_results().await?;
    let total_votes: u64 = lines.iter().map(|line| line.votes).sum();

    let entries = lines
        .into_iter()
        .map(|line| TallyEntry {
            candidate_id: line.id,
            candidate_name: line.name.unwrap_or_default(),
            votes: line.votes,
            percentage: tally::percentage(line.votes, total_votes),
        })
        .collect();

    Ok(Json(Envelope::success(entries)))
}

/// Attach catalog metadata to a bare candidate identity.
fn enrich(id: i32, name: Option<String>, catalog: &CandidateCatalog) -> Candidate {
    let metadata = catalog.metadata(id);
    Candidate {
        id,
        name: name.unwrap_or_default(),
        party: metadata.party,
        image: metadata.image,
    }
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        serde::json::serde_json::{self, json},
    };

    use crate::{
        client::{
            registration::{EMPTY_GRANT_CARD, INELIGIBLE_CARD, ISSUED_CREDENTIAL},
            voting::{SILENT_REJECT_CREDENTIAL, SPENT_CREDENTIAL, SPENT_MESSAGE},
            Authority,
        },
        model::catalog::{CatalogEntry, FALLBACK_PARTY},
        testing,
    };

    use super::*;

    #[rocket::async_test]
    async fn blank_card_is_validated_before_any_backend_call() {
        // Both authorities "unreachable": reaching one would turn the reply
        // into a 502 instead of the expected validation envelope.
        let client = testing::client(testing::offline_figment()).await;

        for card in ["", "   ", "\t"] {
            let response = client
                .post(uri!("/api/bff/voting", issue_credential))
                .header(ContentType::JSON)
                .body(json!({ "citizenCardNumber": card }).to_string())
                .dispatch()
                .await;

            assert_eq!(Status::Ok, response.status());
            let envelope = response.into_json::<Envelope<String>>().await.unwrap();
            assert_eq!(Envelope::failure(MSG_CARD_REQUIRED), envelope);
        }
    }

    #[rocket::async_test]
    async fn ineligible_elector_is_rejected_with_200() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", issue_credential))
            .header(ContentType::JSON)
            .body(json!({ "citizenCardNumber": INELIGIBLE_CARD }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<String>>().await.unwrap();
        assert_eq!(Envelope::failure(MSG_NOT_ELIGIBLE), envelope);
    }

    #[rocket::async_test]
    async fn empty_grant_counts_as_ineligible() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", issue_credential))
            .header(ContentType::JSON)
            .body(json!({ "citizenCardNumber": EMPTY_GRANT_CARD }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<String>>().await.unwrap();
        assert_eq!(Envelope::failure(MSG_NOT_ELIGIBLE), envelope);
    }

    #[rocket::async_test]
    async fn eligible_elector_receives_a_credential() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", issue_credential))
            .header(ContentType::JSON)
            .body(json!({ "citizenCardNumber": "12345678" }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<String>>().await.unwrap();
        assert_eq!(Envelope::success(ISSUED_CREDENTIAL.to_string()), envelope);
    }

    #[rocket::async_test]
    async fn registration_outage_is_a_502_without_detail() {
        let client = testing::client(testing::offline_figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", issue_credential))
            .header(ContentType::JSON)
            .body(json!({ "citizenCardNumber": "12345678" }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::BadGateway, response.status());
        let body = response.into_string().await.unwrap();
        // The technical cause stays in the logs.
        assert!(!body.contains("canned"), "leaked detail: {body}");
        let envelope: Envelope<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(
            Envelope::failure(Authority::Registration.outage_message()),
            envelope
        );
    }

    #[rocket::async_test]
    async fn registration_endpoint_defaults_to_the_voting_endpoint() {
        // Only the voting endpoint is configured, and it is unreachable; the
        // credential call must inherit it and fail as a 502.
        let figment = testing::base_figment().merge(("voting_authority_url", testing::OFFLINE_URL));
        let client = testing::client(figment).await;

        let response = client
            .post(uri!("/api/bff/voting", issue_credential))
            .header(ContentType::JSON)
            .body(json!({ "citizenCardNumber": "12345678" }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::BadGateway, response.status());
    }

    #[rocket::async_test]
    async fn candidates_are_enriched_in_backend_order() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .get(uri!("/api/bff/voting", get_candidates))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response
            .into_json::<Envelope<Vec<Candidate>>>()
            .await
            .unwrap();
        let candidates = envelope.into_data().unwrap();

        assert_eq!(
            vec![
                Candidate {
                    id: 1,
                    name: "Ana Silva".to_string(),
                    party: "Partido do Progresso".to_string(),
                    image: "https://picsum.photos/id/64/200/200".to_string(),
                },
                Candidate {
                    id: 2,
                    name: "Bruno Costa".to_string(),
                    party: "Partido Conservador".to_string(),
                    image: "https://picsum.photos/id/91/200/200".to_string(),
                },
                // Registered with the AV but absent from the catalog.
                Candidate {
                    id: 9,
                    name: "Carla Nunes".to_string(),
                    party: FALLBACK_PARTY.to_string(),
                    image: String::new(),
                },
            ],
            candidates
        );
    }

    #[rocket::async_test]
    async fn configured_catalog_replaces_the_bundled_one() {
        let figment = testing::figment().merge((
            "candidate_catalog",
            vec![CatalogEntry {
                id: 9,
                party: "Aliança Nova".to_string(),
                image: "https://example.test/9.png".to_string(),
            }],
        ));
        let client = testing::client(figment).await;

        let response = client
            .get(uri!("/api/bff/voting", get_candidates))
            .dispatch()
            .await;

        let envelope = response
            .into_json::<Envelope<Vec<Candidate>>>()
            .await
            .unwrap();
        let candidates = envelope.into_data().unwrap();

        assert_eq!("Aliança Nova", candidates[2].party);
        // Ids known only to the bundled catalog now fall back too.
        assert_eq!(FALLBACK_PARTY, candidates[0].party);
    }

    #[rocket::async_test]
    async fn blank_credential_is_validated_before_any_backend_call() {
        let client = testing::client(testing::offline_figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", submit_vote))
            .header(ContentType::JSON)
            .body(json!({ "credential": "  ", "candidateId": 1 }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<bool>>().await.unwrap();
        assert_eq!(Envelope::failure(MSG_CREDENTIAL_REQUIRED), envelope);
    }

    #[rocket::async_test]
    async fn accepted_vote_returns_true() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", submit_vote))
            .header(ContentType::JSON)
            .body(json!({ "credential": "CRED-FRESH", "candidateId": 2 }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<bool>>().await.unwrap();
        assert_eq!(Envelope::success(true), envelope);
    }

    #[rocket::async_test]
    async fn rejection_message_is_passed_through_verbatim() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", submit_vote))
            .header(ContentType::JSON)
            .body(json!({ "credential": SPENT_CREDENTIAL, "candidateId": 1 }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<bool>>().await.unwrap();
        assert_eq!(Envelope::failure(SPENT_MESSAGE), envelope);
    }

    #[rocket::async_test]
    async fn silent_rejection_gets_the_default_message() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .post(uri!("/api/bff/voting", submit_vote))
            .header(ContentType::JSON)
            .body(
                json!({ "credential": SILENT_REJECT_CREDENTIAL, "candidateId": 1 }).to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response.into_json::<Envelope<bool>>().await.unwrap();
        assert_eq!(Envelope::failure(MSG_VOTE_REJECTED), envelope);
    }

    #[rocket::async_test]
    async fn voting_outage_is_a_502() {
        let client = testing::client(testing::offline_figment()).await;

        for response in [
            client
                .get(uri!("/api/bff/voting", get_candidates))
                .dispatch()
                .await,
            client
                .post(uri!("/api/bff/voting", submit_vote))
                .header(ContentType::JSON)
                .body(json!({ "credential": "CRED-FRESH", "candidateId": 1 }).to_string())
                .dispatch()
                .await,
            client
                .get(uri!("/api/bff/voting", get_results))
                .dispatch()
                .await,
        ] {
            assert_eq!(Status::BadGateway, response.status());
            let body = response.into_string().await.unwrap();
            assert!(!body.contains("canned"), "leaked detail: {body}");
            let envelope: Envelope<bool> = serde_json::from_str(&body).unwrap();
            assert_eq!(
                Envelope::failure(Authority::Voting.outage_message()),
                envelope
            );
        }
    }

    #[rocket::async_test]
    async fn results_carry_derived_percentages_in_backend_order() {
        let client = testing::client(testing::figment()).await;

        let response = client
            .get(uri!("/api/bff/voting", get_results))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let envelope = response
            .into_json::<Envelope<Vec<TallyEntry>>>()
            .await
            .unwrap();

        assert_eq!(
            Envelope::success(vec![
                TallyEntry {
                    candidate_id: 1,
                    candidate_name: "Ana Silva".to_string(),
                    votes: 30,
                    percentage: 30.0,
                },
                TallyEntry {
                    candidate_id: 2,
                    candidate_name: "Bruno Costa".to_string(),
                    votes: 70,
                    percentage: 70.0,
                },
            ]),
            envelope
        );
    }
}
