//! Bebop aggregate-order settlement adapter.
//!
//! Reshapes a venue-agnostic swap order into Bebop's signable partial
//! order, signs it under the venue's EIP-712 domain and assembles the
//! approval and settlement calls. The returned solver sequence must be
//! executed strictly in order: the venue cannot pull taker funds it was
//! never approved to spend.

use crate::nonce::{NonceSource, RandomNonce};
use crate::{OrderError, SettlementContext, VenueAdapter};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, Eip712Domain, SolCall, SolStruct};
use async_trait::async_trait;
#[cfg(test)]
use solver_account::AccountInterface;
use solver_types::{
	encode_commands, SettlementCall, SettlementPlan, Signature, SwapOrder, TokenKind,
	TokenRegistry,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

// Solidity type definitions for the venue's settlement contract. The Partial
// field names are part of the EIP-712 type hash and must not change.
sol! {
	/// Single-maker order in the venue's signable layout.
	#[derive(Debug, PartialEq, Eq)]
	struct Partial {
		uint256 expiry;
		address taker_address;
		address maker_address;
		uint256 maker_nonce;
		address[] taker_tokens;
		address[] maker_tokens;
		uint256[] taker_amounts;
		uint256[] maker_amounts;
		address receiver;
		bytes commands;
	}

	/// Batch view the settlement entry point takes; single-maker orders are
	/// wrapped into one-element batches.
	#[derive(Debug, PartialEq, Eq)]
	struct Aggregate {
		uint256 expiry;
		address taker_address;
		address[] maker_addresses;
		uint256[] maker_nonces;
		address[][] taker_tokens;
		address[][] maker_tokens;
		uint256[][] taker_amounts;
		uint256[][] maker_amounts;
		address receiver;
		bytes commands;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct OrderSignature {
		uint8 signatureType;
		bytes signatureBytes;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct MakerSignature {
		OrderSignature signature;
		bool usingPermit2;
	}

	/// Venue settlement entry point.
	interface IBebopSettlement {
		function SettleAggregateOrder(
			Aggregate order,
			OrderSignature takerSig,
			MakerSignature[] makerSigs
		) external payable returns (bool);
	}

	interface IERC20 {
		function approve(address spender, uint256 amount) external returns (bool);
	}
}

/// EIP-712 signature marker in the venue's signature-type enum.
const EIP712_SIGNATURE_TYPE: u8 = 0;

/// Default excess added to every maker amount, a safety margin against price
/// drift between signing and settlement.
pub const DEFAULT_SOLVER_EXCESS: u64 = 1000;

/// Default validity horizon for signed orders.
pub const DEFAULT_ORDER_TTL: Duration = Duration::from_secs(1000);

/// A partial order bound to its maker signature.
///
/// Never mutated after signing; any mutation invalidates the signature.
#[derive(Debug, Clone)]
pub struct SignedPartialOrder {
	pub order: Partial,
	pub signature: Signature,
}

/// Bebop venue adapter.
///
/// Holds no mutable state across builds; concurrent builds over distinct
/// orders are independent apart from the nonce draw.
pub struct BebopVenue {
	/// On-chain address of the settlement contract.
	settlement_address: Address,
	/// Signing domain the maker signature is bound to.
	domain: Eip712Domain,
	/// Resolves native-asset sentinels to their wrapped representation.
	tokens: TokenRegistry,
	/// Excess added to each maker amount.
	solver_excess: U256,
	/// Validity horizon for signed orders.
	order_ttl: Duration,
	/// Maker nonce source.
	nonces: Box<dyn NonceSource>,
}

impl BebopVenue {
	/// Creates an adapter with the venue's standard signing domain and
	/// default excess, horizon and nonce source.
	pub fn new(settlement_address: Address, chain_id: u64, tokens: TokenRegistry) -> Self {
		Self::with_parameters(
			settlement_address,
			standard_domain(settlement_address, chain_id),
			tokens,
			DEFAULT_SOLVER_EXCESS,
			DEFAULT_ORDER_TTL,
			Box::new(RandomNonce),
		)
	}

	/// Creates a fully parameterized adapter.
	pub fn with_parameters(
		settlement_address: Address,
		domain: Eip712Domain,
		tokens: TokenRegistry,
		solver_excess: u64,
		order_ttl: Duration,
		nonces: Box<dyn NonceSource>,
	) -> Self {
		Self {
			settlement_address,
			domain,
			tokens,
			solver_excess: U256::from(solver_excess),
			order_ttl,
			nonces,
		}
	}

	/// The signing domain maker signatures are bound to.
	pub fn domain(&self) -> &Eip712Domain {
		&self.domain
	}

	/// Substitutes wrapped-native for sentinel positions on one side,
	/// appending the per-position flags to `kinds`.
	fn normalize_side(
		&self,
		side_tokens: &[Address],
		kinds: &mut Vec<TokenKind>,
	) -> Result<Vec<Address>, OrderError> {
		let mut tokens = Vec::with_capacity(side_tokens.len());
		for &token in side_tokens {
			let (settleable, kind) = self
				.tokens
				.resolve(token)
				.ok_or(OrderError::UnsupportedToken(token))?;
			tokens.push(settleable);
			kinds.push(kind);
		}
		Ok(tokens)
	}

	/// An allowance grant for the venue over `token`.
	fn approval_call(&self, token: Address, amount: U256) -> SettlementCall {
		let data = IERC20::approveCall {
			spender: self.settlement_address,
			amount,
		}
		.abi_encode();

		SettlementCall {
			target: token,
			data: data.into(),
			value: U256::ZERO,
			expect_success: true,
		}
	}

	/// Encodes the settlement entry-point call for a signed order.
	///
	/// The taker signature is an empty placeholder; taker authorization is
	/// supplied by the surrounding solver flow.
	fn settlement_call(&self, signed: &SignedPartialOrder) -> SettlementCall {
		let order = &signed.order;
		let aggregate = Aggregate {
			expiry: order.expiry,
			taker_address: order.taker_address,
			maker_addresses: vec![order.maker_address],
			maker_nonces: vec![order.maker_nonce],
			taker_tokens: vec![order.taker_tokens.clone()],
			maker_tokens: vec![order.maker_tokens.clone()],
			taker_amounts: vec![order.taker_amounts.clone()],
			maker_amounts: vec![order.maker_amounts.clone()],
			receiver: order.receiver,
			commands: order.commands.clone(),
		};

		let data = IBebopSettlement::SettleAggregateOrderCall {
			order: aggregate,
			takerSig: OrderSignature {
				signatureType: EIP712_SIGNATURE_TYPE,
				signatureBytes: Bytes::new(),
			},
			makerSigs: vec![MakerSignature {
				signature: OrderSignature {
					signatureType: EIP712_SIGNATURE_TYPE,
					signatureBytes: Bytes::from(signed.signature.0.clone()),
				},
				usingPermit2: false,
			}],
		}
		.abi_encode();

		SettlementCall {
			target: self.settlement_address,
			data: data.into(),
			value: U256::ZERO,
			expect_success: true,
		}
	}
}

#[async_trait]
impl VenueAdapter for BebopVenue {
	async fn build_settlement(
		&self,
		order: &SwapOrder,
		ctx: &SettlementContext,
	) -> Result<SettlementPlan, OrderError> {
		order
			.check_lengths()
			.map_err(OrderError::InvariantViolation)?;

		// Maker flags first, then taker flags. Wire order is fixed.
		let mut kinds = Vec::with_capacity(order.buy_tokens.len() + order.sell_tokens.len());
		let maker_tokens = self.normalize_side(&order.buy_tokens, &mut kinds)?;
		let taker_tokens = self.normalize_side(&order.sell_tokens, &mut kinds)?;

		let maker_amounts = order
			.buy_amounts
			.iter()
			.map(|amount| {
				amount.checked_add(self.solver_excess).ok_or_else(|| {
					OrderError::InvariantViolation("maker amount overflows U256".into())
				})
			})
			.collect::<Result<Vec<_>, _>>()?;
		let taker_amounts = order.sell_amounts.clone();

		let maker_address = ctx.maker.address().await?;
		let maker_nonce = self.nonces.next_nonce();
		let expiry = unix_now() + self.order_ttl.as_secs();
		let receiver = ctx.receiver.unwrap_or(ctx.taker);

		let partial = Partial {
			expiry: U256::from(expiry),
			taker_address: ctx.taker,
			maker_address,
			maker_nonce: U256::from(maker_nonce),
			taker_tokens: taker_tokens.clone(),
			maker_tokens: maker_tokens.clone(),
			taker_amounts: taker_amounts.clone(),
			maker_amounts: maker_amounts.clone(),
			receiver,
			commands: encode_commands(&kinds).into(),
		};

		let digest = partial.eip712_signing_hash(&self.domain);
		let signature = ctx.maker.sign_digest(digest).await?;
		debug!(nonce = maker_nonce, expiry, "signed partial order");

		let signed = SignedPartialOrder {
			order: partial,
			signature,
		};

		let maker_approvals = maker_tokens
			.iter()
			.zip(&maker_amounts)
			.map(|(&token, &amount)| self.approval_call(token, amount))
			.collect();

		let mut calls: Vec<SettlementCall> = taker_tokens
			.iter()
			.zip(&taker_amounts)
			.map(|(&token, &amount)| self.approval_call(token, amount))
			.collect();
		calls.push(self.settlement_call(&signed));

		Ok(SettlementPlan {
			maker_approvals,
			calls,
		})
	}
}

/// The venue's standard signing domain on the given chain.
pub fn standard_domain(settlement_address: Address, chain_id: u64) -> Eip712Domain {
	Eip712Domain::new(
		Some("BebopSettlement".into()),
		Some("1".into()),
		Some(U256::from(chain_id)),
		Some(settlement_address),
		None,
	)
}

fn unix_now() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("system clock before Unix epoch")
		.as_secs()
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, PrimitiveSignature};
	use solver_account::implementations::local::LocalWallet;
	use solver_account::AccountError;
	use solver_types::NATIVE_TOKEN;
	use std::sync::Arc;

	const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
	const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
	const MAKER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	struct FixedNonce(u64);

	impl NonceSource for FixedNonce {
		fn next_nonce(&self) -> u64 {
			self.0
		}
	}

	fn settlement_address() -> Address {
		Address::repeat_byte(0xbe)
	}

	fn venue() -> BebopVenue {
		BebopVenue::with_parameters(
			settlement_address(),
			standard_domain(settlement_address(), 1),
			TokenRegistry::with_wrapped_native(WETH),
			1000,
			Duration::from_secs(1000),
			Box::new(FixedNonce(7)),
		)
	}

	fn context() -> SettlementContext {
		SettlementContext {
			taker: Address::repeat_byte(0x11),
			maker: Arc::new(LocalWallet::new(MAKER_KEY).unwrap()),
			receiver: None,
		}
	}

	fn usdc_for_native_order() -> SwapOrder {
		SwapOrder {
			sell_tokens: vec![USDC],
			sell_amounts: vec![U256::from(1000)],
			buy_tokens: vec![NATIVE_TOKEN],
			buy_amounts: vec![U256::from(1)],
		}
	}

	fn decode_settlement(call: &SettlementCall) -> IBebopSettlement::SettleAggregateOrderCall {
		IBebopSettlement::SettleAggregateOrderCall::abi_decode(&call.data, true).unwrap()
	}

	#[tokio::test]
	async fn test_one_approval_per_sell_token_plus_settlement() {
		let order = SwapOrder {
			sell_tokens: vec![USDC, Address::repeat_byte(0x33)],
			sell_amounts: vec![U256::from(500), U256::from(600)],
			buy_tokens: vec![WETH],
			buy_amounts: vec![U256::from(2)],
		};

		let plan = venue().build_settlement(&order, &context()).await.unwrap();

		assert_eq!(plan.calls.len(), order.sell_tokens.len() + 1);
		assert_eq!(plan.calls[0].target, USDC);
		assert_eq!(plan.calls[1].target, Address::repeat_byte(0x33));
		// The settlement call is always last.
		assert_eq!(plan.settlement_call().unwrap().target, settlement_address());
	}

	#[tokio::test]
	async fn test_usdc_for_native_scenario() {
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap();

		assert_eq!(plan.calls.len(), 2);

		let approval = IERC20::approveCall::abi_decode(&plan.calls[0].data, true).unwrap();
		assert_eq!(plan.calls[0].target, USDC);
		assert_eq!(approval.spender, settlement_address());
		assert_eq!(approval.amount, U256::from(1000));

		let settle = decode_settlement(&plan.calls[1]);
		assert_eq!(settle.order.maker_tokens, vec![vec![WETH]]);
		assert_eq!(settle.order.maker_amounts, vec![vec![U256::from(1001)]]);
		// Maker flag first (native), then taker flag (plain ERC-20).
		assert_eq!(settle.order.commands.as_ref(), &[0x01, 0x00]);
	}

	#[tokio::test]
	async fn test_taker_amounts_pass_through_unchanged() {
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap();

		let settle = decode_settlement(plan.settlement_call().unwrap());
		assert_eq!(settle.order.taker_tokens, vec![vec![USDC]]);
		assert_eq!(settle.order.taker_amounts, vec![vec![U256::from(1000)]]);
		assert_eq!(settle.order.maker_nonces, vec![U256::from(7)]);
	}

	#[tokio::test]
	async fn test_receiver_defaults_to_taker_and_honors_override() {
		let ctx = context();
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &ctx)
			.await
			.unwrap();
		let settle = decode_settlement(plan.settlement_call().unwrap());
		assert_eq!(settle.order.receiver, ctx.taker);

		let receiver = Address::repeat_byte(0x99);
		let ctx = SettlementContext {
			receiver: Some(receiver),
			..context()
		};
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &ctx)
			.await
			.unwrap();
		let settle = decode_settlement(plan.settlement_call().unwrap());
		assert_eq!(settle.order.receiver, receiver);
	}

	#[tokio::test]
	async fn test_expiry_is_in_the_future() {
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap();
		let settle = decode_settlement(plan.settlement_call().unwrap());
		assert!(settle.order.expiry > U256::from(unix_now()));
	}

	#[tokio::test]
	async fn test_taker_signature_is_empty_placeholder() {
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap();
		let settle = decode_settlement(plan.settlement_call().unwrap());
		assert!(settle.takerSig.signatureBytes.is_empty());
		assert_eq!(settle.makerSigs.len(), 1);
		assert!(!settle.makerSigs[0].usingPermit2);
	}

	#[tokio::test]
	async fn test_maker_approval_grants_owed_amount() {
		let plan = venue()
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap();

		assert_eq!(plan.maker_approvals.len(), 1);
		assert_eq!(plan.maker_approvals[0].target, WETH);

		let approval =
			IERC20::approveCall::abi_decode(&plan.maker_approvals[0].data, true).unwrap();
		assert_eq!(approval.spender, settlement_address());
		// The allowance covers the inflated maker amount. An earlier flow
		// approved the token address reinterpreted as a quantity instead.
		assert_eq!(approval.amount, U256::from(1001));
		assert_ne!(
			approval.amount,
			U256::from_be_slice(WETH.as_slice())
		);
	}

	#[tokio::test]
	async fn test_maker_signature_recovers_maker_address() {
		let venue = venue();
		let ctx = context();
		let plan = venue
			.build_settlement(&usdc_for_native_order(), &ctx)
			.await
			.unwrap();

		let settle = decode_settlement(plan.settlement_call().unwrap());
		let partial = partial_from_aggregate(&settle.order);
		let digest = partial.eip712_signing_hash(venue.domain());

		let sig_bytes = settle.makerSigs[0].signature.signatureBytes.as_ref();
		let recovered = recover(sig_bytes, digest);
		assert_eq!(recovered, ctx.maker.address().await.unwrap());

		// Mutating any signed field invalidates the signature.
		let mut tampered = partial.clone();
		tampered.receiver = Address::repeat_byte(0x66);
		let tampered_digest = tampered.eip712_signing_hash(venue.domain());
		assert_ne!(recover(sig_bytes, tampered_digest), recovered);
	}

	struct RejectingSigner;

	#[async_trait]
	impl AccountInterface for RejectingSigner {
		async fn address(&self) -> Result<Address, AccountError> {
			Ok(Address::repeat_byte(0x22))
		}

		async fn sign_digest(
			&self,
			_digest: alloy_primitives::B256,
		) -> Result<Signature, AccountError> {
			Err(AccountError::SigningFailed("signer unavailable".to_string()))
		}
	}

	#[tokio::test]
	async fn test_signing_failure_aborts_build() {
		let ctx = SettlementContext {
			taker: Address::repeat_byte(0x11),
			maker: Arc::new(RejectingSigner),
			receiver: None,
		};

		let err = venue()
			.build_settlement(&usdc_for_native_order(), &ctx)
			.await
			.unwrap_err();
		assert!(matches!(err, OrderError::SigningFailed(_)));
	}

	#[tokio::test]
	async fn test_length_mismatch_is_invariant_violation() {
		let order = SwapOrder {
			sell_tokens: vec![USDC],
			sell_amounts: vec![],
			buy_tokens: vec![WETH],
			buy_amounts: vec![U256::from(1)],
		};

		let err = venue()
			.build_settlement(&order, &context())
			.await
			.unwrap_err();
		assert!(matches!(err, OrderError::InvariantViolation(_)));
	}

	#[tokio::test]
	async fn test_native_without_wrapped_is_unsupported() {
		let venue = BebopVenue::with_parameters(
			settlement_address(),
			standard_domain(settlement_address(), 1),
			TokenRegistry::new(NATIVE_TOKEN, None),
			1000,
			Duration::from_secs(1000),
			Box::new(FixedNonce(7)),
		);

		let err = venue
			.build_settlement(&usdc_for_native_order(), &context())
			.await
			.unwrap_err();
		assert!(matches!(err, OrderError::UnsupportedToken(token) if token == NATIVE_TOKEN));
	}

	fn partial_from_aggregate(aggregate: &Aggregate) -> Partial {
		Partial {
			expiry: aggregate.expiry,
			taker_address: aggregate.taker_address,
			maker_address: aggregate.maker_addresses[0],
			maker_nonce: aggregate.maker_nonces[0],
			taker_tokens: aggregate.taker_tokens[0].clone(),
			maker_tokens: aggregate.maker_tokens[0].clone(),
			taker_amounts: aggregate.taker_amounts[0].clone(),
			maker_amounts: aggregate.maker_amounts[0].clone(),
			receiver: aggregate.receiver,
			commands: aggregate.commands.clone(),
		}
	}

	fn recover(sig_bytes: &[u8], digest: alloy_primitives::B256) -> Address {
		let r = U256::from_be_slice(&sig_bytes[..32]);
		let s = U256::from_be_slice(&sig_bytes[32..64]);
		PrimitiveSignature::new(r, s, sig_bytes[64] == 28)
			.recover_address_from_prehash(&digest)
			.unwrap()
	}
}
